//! Typed view-models and their HTML render functions. Markup generation is
//! kept apart from validation and state transitions; everything that ends
//! up between tags goes through [`escape_html`].

use crate::models::Recette;
use crate::ui::state::{App, ListState, Notification, Tab};

const CARD_DESCRIPTION_MAX: usize = 120;

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{cut}...")
}

/// Card artwork: the uploaded photo when there is one, the emoji otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardArt {
    Image(String),
    Emoji(String),
}

/// What one grid card displays. Built from a [`Recette`], never from markup.
#[derive(Debug, Clone)]
pub struct CardView {
    pub id: i32,
    pub titre: String,
    pub categorie: &'static str,
    pub description: String,
    pub temps_preparation: i32,
    pub difficulte: &'static str,
    pub art: CardArt,
}

impl CardView {
    pub fn from_recette(recette: &Recette) -> Self {
        let art = match &recette.image_url {
            Some(url) if !url.trim().is_empty() => CardArt::Image(url.clone()),
            _ => CardArt::Emoji(recette.emoji.clone()),
        };

        CardView {
            id: recette.id,
            titre: recette.titre.clone(),
            categorie: recette.categorie.as_str(),
            description: truncate(&recette.description, CARD_DESCRIPTION_MAX),
            temps_preparation: recette.temps_preparation,
            difficulte: recette.difficulte.as_str(),
            art,
        }
    }
}

pub fn render_card(card: &CardView) -> String {
    let art = match &card.art {
        CardArt::Image(url) => format!(
            r#"<img src="{}" alt="{}">"#,
            escape_html(url),
            escape_html(&card.titre)
        ),
        CardArt::Emoji(emoji) => format!(
            r#"<span class="recipe-emoji">{}</span>"#,
            escape_html(emoji)
        ),
    };

    format!(
        r#"<div class="recipe-card{has_image}" data-category="{categorie}" data-id="{id}">
  <div class="recipe-image{has_image}">
    {art}
    <div class="recipe-image-overlay"><h3 class="recipe-title">{titre}</h3></div>
  </div>
  <div class="recipe-content">
    <p class="recipe-description">{description}</p>
    <div class="recipe-meta">
      <div class="recipe-time">⏱️ {temps} min</div>
      <div class="recipe-difficulty">{difficulte}</div>
    </div>
  </div>
</div>"#,
        has_image = if matches!(card.art, CardArt::Image(_)) {
            " has-image"
        } else {
            ""
        },
        categorie = card.categorie,
        id = card.id,
        art = art,
        titre = escape_html(&card.titre),
        description = escape_html(&card.description),
        temps = card.temps_preparation,
        difficulte = card.difficulte,
    )
}

/// The full grid: cards, the empty state, or the inline error with retry.
pub fn render_grid(list: &ListState) -> String {
    match list {
        ListState::Loaded(recettes) if recettes.is_empty() => r#"<div class="empty-state">
  <span class="empty-state-emoji">🍳</span>
  <p>Aucune recette trouvée</p>
</div>"#
            .to_string(),
        ListState::Loaded(recettes) => recettes
            .iter()
            .map(|r| render_card(&CardView::from_recette(r)))
            .collect::<Vec<_>>()
            .join("\n"),
        ListState::Failed(_) => r#"<div class="grid-error">
  <p>Erreur lors du chargement des recettes.</p>
  <button type="button" class="retry-btn">Réessayer</button>
</div>"#
            .to_string(),
    }
}

/// Detail modal for one recipe: full lists, ordered as stored.
pub fn render_detail(recette: &Recette) -> String {
    let ingredients = recette
        .ingredients
        .iter()
        .map(|i| format!("      <li>{}</li>", escape_html(i)))
        .collect::<Vec<_>>()
        .join("\n");

    let instructions = recette
        .instructions
        .iter()
        .map(|i| format!("      <li>{}</li>", escape_html(i)))
        .collect::<Vec<_>>()
        .join("\n");

    let art = match &recette.image_url {
        Some(url) if !url.trim().is_empty() => format!(
            r#"<img class="detail-image" src="{}" alt="{}">"#,
            escape_html(url),
            escape_html(&recette.titre)
        ),
        _ => format!(
            r#"<span class="detail-emoji">{}</span>"#,
            escape_html(&recette.emoji)
        ),
    };

    format!(
        r#"<div class="modal-overlay">
  <div class="modal-content" data-id="{id}">
    {art}
    <h2>{titre}</h2>
    <p class="detail-description">{description}</p>
    <div class="recipe-meta">
      <span>⏱️ {temps} min</span>
      <span>{difficulte}</span>
    </div>
    <h3>Ingrédients</h3>
    <ul class="detail-ingredients">
{ingredients}
    </ul>
    <h3>Instructions</h3>
    <ol class="detail-instructions">
{instructions}
    </ol>
    <div class="modal-actions">
      <button type="button" class="edit-btn">Modifier</button>
      <button type="button" class="delete-btn">Supprimer</button>
      <button type="button" class="close-btn">Fermer</button>
    </div>
  </div>
</div>"#,
        id = recette.id,
        art = art,
        titre = escape_html(&recette.titre),
        description = escape_html(&recette.description),
        temps = recette.temps_preparation,
        difficulte = recette.difficulte.as_str(),
        ingredients = ingredients,
        instructions = instructions,
    )
}

pub fn render_notification(notification: &Notification) -> String {
    format!(
        r#"<div class="notification notification-{kind} show">{message}<button type="button" class="notification-close">×</button></div>"#,
        kind = notification.kind.as_class(),
        message = escape_html(&notification.message),
    )
}

fn tab_button(app: &App, tab: Tab, value: &str, label: &str) -> String {
    format!(
        r#"<button type="button" class="tab-btn{active}" data-tab="{value}">{label}</button>"#,
        active = if app.tab == tab { " active" } else { "" },
        value = value,
        label = label,
    )
}

/// The application shell served at `/`.
pub fn render_shell(app: &App) -> String {
    let notification = app
        .notification
        .as_ref()
        .map(render_notification)
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Mon Carnet de Recettes</title>
  <link rel="stylesheet" href="/css/style.css">
</head>
<body>
  <header>
    <h1>🍽️ Mon Carnet de Recettes</h1>
    <nav class="tabs">
      {tab_all}
      {tab_cuisine}
      {tab_cocktails}
    </nav>
    <input type="search" class="search-bar" placeholder="Rechercher une recette..." value="{search}">
    <button type="button" class="add-btn">+ Nouvelle recette</button>
  </header>
  <main>
    <div id="recipesGrid" class="recipes-grid">
{grid}
    </div>
  </main>
  {notification}
  <script src="/js/main.js"></script>
</body>
</html>"#,
        tab_all = tab_button(app, Tab::All, "all", "Toutes"),
        tab_cuisine = tab_button(app, Tab::Cuisine, "cuisine", "🍴 Cuisine"),
        tab_cocktails = tab_button(app, Tab::Cocktails, "cocktails", "🍹 Cocktails"),
        search = escape_html(&app.search),
        grid = render_grid(&app.list),
        notification = notification,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Categorie, Difficulte};
    use crate::ui::state::NotificationKind;

    fn recette(image_url: Option<&str>) -> Recette {
        Recette {
            id: 3,
            titre: "Risotto <aux> champignons".to_string(),
            description: "Un délicieux risotto".to_string(),
            categorie: Categorie::Cuisine,
            temps_preparation: 35,
            difficulte: Difficulte::Moyen,
            ingredients: vec!["riz".to_string(), "champignons".to_string()],
            instructions: vec!["nacrer".to_string(), "mouiller".to_string()],
            emoji: "🥘".to_string(),
            image_url: image_url.map(str::to_string),
            date_creation: chrono::NaiveDateTime::default(),
            date_modification: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn card_with_image_uses_the_photo_variant() {
        let card = CardView::from_recette(&recette(Some("/media/uploads/recipe-1-a.png")));
        assert_eq!(
            card.art,
            CardArt::Image("/media/uploads/recipe-1-a.png".to_string())
        );

        let html = render_card(&card);
        assert!(html.contains(r#"<img src="/media/uploads/recipe-1-a.png""#));
        assert!(html.contains("recipe-card has-image"));
    }

    #[test]
    fn card_without_image_falls_back_to_emoji() {
        let card = CardView::from_recette(&recette(None));
        assert_eq!(card.art, CardArt::Emoji("🥘".to_string()));

        let html = render_card(&card);
        assert!(html.contains("🥘"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn blank_image_url_counts_as_no_image() {
        let card = CardView::from_recette(&recette(Some("  ")));
        assert!(matches!(card.art, CardArt::Emoji(_)));
    }

    #[test]
    fn interpolated_text_is_escaped() {
        let html = render_card(&CardView::from_recette(&recette(None)));
        assert!(html.contains("Risotto &lt;aux&gt; champignons"));
        assert!(!html.contains("<aux>"));
    }

    #[test]
    fn long_descriptions_are_truncated_on_cards() {
        let mut r = recette(None);
        r.description = "x".repeat(150);
        let card = CardView::from_recette(&r);
        assert_eq!(card.description.chars().count(), 123); // 120 + "..."
        assert!(card.description.ends_with("..."));
    }

    #[test]
    fn empty_grid_shows_the_empty_state() {
        let html = render_grid(&ListState::Loaded(Vec::new()));
        assert!(html.contains("Aucune recette trouvée"));
    }

    #[test]
    fn failed_grid_shows_the_retry_action() {
        let html = render_grid(&ListState::Failed("boom".to_string()));
        assert!(html.contains("Réessayer"));
    }

    #[test]
    fn detail_lists_keep_their_order() {
        let html = render_detail(&recette(None));
        let riz = html.find("<li>riz</li>").unwrap();
        let champignons = html.find("<li>champignons</li>").unwrap();
        assert!(riz < champignons);
    }

    #[test]
    fn shell_marks_the_active_tab_and_search_text() {
        let mut app = App::new();
        app.switch_tab(crate::ui::state::Tab::Cocktails);
        app.set_search("mojito & co");
        app.apply_list(Ok(vec![recette(None)]));

        let html = render_shell(&app);
        assert!(html.contains(r#"data-tab="cocktails">🍹 Cocktails"#));
        assert!(html.contains(r#"class="tab-btn active" data-tab="cocktails""#));
        assert!(html.contains("mojito &amp; co"));
        assert!(html.contains("recipe-card"));
    }

    #[test]
    fn notification_carries_its_kind_class() {
        let mut app = App::new();
        app.notify("Recette créée avec succès !", NotificationKind::Success);
        let html = render_notification(app.notification.as_ref().unwrap());
        assert!(html.contains("notification-success"));
    }
}
