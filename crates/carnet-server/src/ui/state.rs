//! Client-side state. Everything the browser app keeps between renders
//! lives in [`App`]; render functions receive it read-only, so every
//! transition is an explicit method here.

use crate::models::{Categorie, Difficulte, Recette, RecetteDraft};
use crate::ui::validate::{self, FieldError};

/// Category tabs above the grid. `All` is the sentinel that drops the
/// category filter from the list query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    All,
    Cuisine,
    Cocktails,
}

impl Tab {
    /// Value for the `categorie` query parameter; `None` for no filter.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            Tab::All => None,
            Tab::Cuisine => Some("cuisine"),
            Tab::Cocktails => Some("cocktails"),
        }
    }
}

/// Outcome of the last list fetch. A failure keeps the grid in an error
/// state with a retry action rather than silently showing stale cards.
#[derive(Debug, Clone)]
pub enum ListState {
    Loaded(Vec<Recette>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// Dismissable, auto-expiring toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// The nested async step inside an open form: uploading the recipe photo.
/// The pending URL is not committed to the server until form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageSlot {
    #[default]
    Idle,
    Uploading,
    Attached(String),
    Failed(String),
}

/// Working copy of a recipe while the create/edit form is open. The two
/// lists are built up entry by entry and only sent on submit.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub edit_id: Option<i32>,
    pub titre: String,
    pub description: String,
    pub categorie: Option<Categorie>,
    pub temps_preparation: Option<i32>,
    pub difficulte: Difficulte,
    pub emoji: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image: ImageSlot,
    pub errors: Vec<FieldError>,
}

impl Draft {
    pub fn from_recette(recette: &Recette) -> Self {
        Draft {
            edit_id: Some(recette.id),
            titre: recette.titre.clone(),
            description: recette.description.clone(),
            categorie: Some(recette.categorie),
            temps_preparation: Some(recette.temps_preparation),
            difficulte: recette.difficulte,
            emoji: Some(recette.emoji.clone()),
            ingredients: recette.ingredients.clone(),
            instructions: recette.instructions.clone(),
            image: match &recette.image_url {
                Some(url) => ImageSlot::Attached(url.clone()),
                None => ImageSlot::Idle,
            },
            errors: Vec::new(),
        }
    }

    pub fn add_ingredient(&mut self, ingredient: &str) {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            return;
        }
        self.ingredients.push(ingredient.to_string());
    }

    pub fn remove_ingredient(&mut self, index: usize) {
        if index < self.ingredients.len() {
            self.ingredients.remove(index);
        }
    }

    pub fn add_instruction(&mut self, instruction: &str) {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return;
        }
        self.instructions.push(instruction.to_string());
    }

    pub fn remove_instruction(&mut self, index: usize) {
        if index < self.instructions.len() {
            self.instructions.remove(index);
        }
    }

    pub fn begin_image_upload(&mut self) {
        self.image = ImageSlot::Uploading;
    }

    pub fn image_uploaded(&mut self, url: String) {
        self.image = ImageSlot::Attached(url);
    }

    pub fn image_upload_failed(&mut self, message: String) {
        self.image = ImageSlot::Failed(message);
    }

    /// Detach the pending image, reverting to the emoji fallback.
    pub fn remove_image(&mut self) {
        self.image = ImageSlot::Idle;
    }

    /// The wire body this draft submits. Lists and the pending image URL
    /// come from the working state, never from the DOM.
    pub fn payload(&self) -> RecetteDraft {
        RecetteDraft {
            titre: Some(self.titre.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            categorie: self.categorie.map(|c| c.as_str().to_string()),
            temps_preparation: self.temps_preparation,
            difficulte: Some(self.difficulte.as_str().to_string()),
            emoji: self.emoji.clone(),
            ingredients: Some(self.ingredients.clone()),
            instructions: Some(self.instructions.clone()),
            image_url: match &self.image {
                ImageSlot::Attached(url) => Some(url.clone()),
                _ => None,
            },
        }
    }
}

/// Create/edit form lifecycle.
#[derive(Debug, Clone, Default)]
pub enum Form {
    #[default]
    Closed,
    Open(Draft),
    Submitting(Draft),
}

/// The whole client application state.
#[derive(Debug, Clone, Default)]
pub struct App {
    pub tab: Tab,
    pub search: String,
    pub list: ListState,
    pub form: Form,
    pub notification: Option<Notification>,
    needs_reload: bool,
}

impl Default for ListState {
    fn default() -> Self {
        ListState::Loaded(Vec::new())
    }
}

impl App {
    pub fn new() -> Self {
        App::default()
    }

    /// Tab switches re-issue the list query with the combined filter.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.needs_reload = true;
    }

    /// Search edits re-issue the list query with the combined filter.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.needs_reload = true;
    }

    /// Current `(categorie, search)` query parameters.
    pub fn list_query(&self) -> (Option<&str>, Option<&str>) {
        let search = (!self.search.is_empty()).then_some(self.search.as_str());
        (self.tab.as_query(), search)
    }

    /// True once per pending reload; the driver fetches and calls
    /// [`App::apply_list`] with the outcome.
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_reload)
    }

    pub fn retry_load(&mut self) {
        self.needs_reload = true;
    }

    /// Replace the rendered grid with the fetch outcome. No diffing.
    pub fn apply_list(&mut self, result: Result<Vec<Recette>, String>) {
        self.list = match result {
            Ok(recettes) => ListState::Loaded(recettes),
            Err(message) => {
                self.notify(
                    "Erreur lors du chargement des recettes. Vérifiez que le serveur est démarré.",
                    NotificationKind::Error,
                );
                ListState::Failed(message)
            }
        };
    }

    pub fn open_create(&mut self) {
        self.form = Form::Open(Draft::default());
    }

    pub fn open_edit(&mut self, recette: &Recette) {
        self.form = Form::Open(Draft::from_recette(recette));
    }

    pub fn close_form(&mut self) {
        self.form = Form::Closed;
    }

    /// The open draft, when there is one to mutate.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match &mut self.form {
            Form::Open(draft) => Some(draft),
            _ => None,
        }
    }

    /// Validate and move to `Submitting`, handing back the body to send.
    /// On validation failure the form stays open with inline messages.
    pub fn begin_submit(&mut self) -> Option<RecetteDraft> {
        let Form::Open(draft) = &mut self.form else {
            return None;
        };

        let errors = validate::validate(draft);
        if !errors.is_empty() {
            draft.errors = errors;
            self.notify(
                "Veuillez corriger les erreurs dans le formulaire",
                NotificationKind::Error,
            );
            return None;
        }

        draft.errors.clear();
        let draft = draft.clone();
        let payload = draft.payload();
        self.form = Form::Submitting(draft);
        Some(payload)
    }

    pub fn submit_succeeded(&mut self) {
        if let Form::Submitting(draft) = &self.form {
            let message = if draft.edit_id.is_some() {
                "Recette modifiée avec succès !"
            } else {
                "Recette créée avec succès !"
            };
            self.notify(message, NotificationKind::Success);
            self.form = Form::Closed;
            self.needs_reload = true;
        }
    }

    /// Server-side rejection reopens the form with the draft intact.
    pub fn submit_failed(&mut self, message: &str) {
        if let Form::Submitting(draft) = &mut self.form {
            let draft = std::mem::take(draft);
            self.form = Form::Open(draft);
            self.notify(message, NotificationKind::Error);
        }
    }

    pub fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.notification = Some(Notification {
            message: message.to_string(),
            kind,
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recette() -> Recette {
        Recette {
            id: 7,
            titre: "Mojito Classic".to_string(),
            description: "Le cocktail cubain traditionnel".to_string(),
            categorie: Categorie::Cocktails,
            temps_preparation: 5,
            difficulte: Difficulte::Facile,
            ingredients: vec!["rhum".to_string(), "menthe".to_string()],
            instructions: vec!["piler".to_string(), "mélanger".to_string()],
            emoji: "🍸".to_string(),
            image_url: None,
            date_creation: chrono::NaiveDateTime::default(),
            date_modification: chrono::NaiveDateTime::default(),
        }
    }

    fn valid_draft(draft: &mut Draft) {
        draft.titre = "Tarte aux pommes".to_string();
        draft.categorie = Some(Categorie::Cuisine);
        draft.add_ingredient("farine");
        draft.add_instruction("cuire");
    }

    #[test]
    fn tab_switch_and_search_request_a_reload() {
        let mut app = App::new();
        assert!(!app.take_reload_request());

        app.switch_tab(Tab::Cocktails);
        assert!(app.take_reload_request());
        assert!(!app.take_reload_request());

        app.set_search("mojito");
        assert!(app.take_reload_request());
        assert_eq!(app.list_query(), (Some("cocktails"), Some("mojito")));
    }

    #[test]
    fn failed_list_fetch_keeps_an_error_state_and_notifies() {
        let mut app = App::new();
        app.apply_list(Err("boom".to_string()));

        assert!(matches!(app.list, ListState::Failed(_)));
        assert!(matches!(
            app.notification,
            Some(Notification {
                kind: NotificationKind::Error,
                ..
            })
        ));

        app.retry_load();
        assert!(app.take_reload_request());
    }

    #[test]
    fn open_edit_prefills_the_draft() {
        let mut app = App::new();
        app.open_edit(&recette());

        let draft = app.draft_mut().unwrap();
        assert_eq!(draft.edit_id, Some(7));
        assert_eq!(draft.titre, "Mojito Classic");
        assert_eq!(draft.ingredients, vec!["rhum", "menthe"]);
        assert_eq!(draft.image, ImageSlot::Idle);
    }

    #[test]
    fn submit_with_invalid_fields_stays_open_with_errors() {
        let mut app = App::new();
        app.open_create();

        assert!(app.begin_submit().is_none());

        let draft = app.draft_mut().expect("form should still be open");
        assert!(!draft.errors.is_empty());
    }

    #[test]
    fn successful_submit_closes_the_form_and_reloads() {
        let mut app = App::new();
        app.open_create();
        valid_draft(app.draft_mut().unwrap());

        let payload = app.begin_submit().expect("draft is valid");
        assert_eq!(payload.titre.as_deref(), Some("Tarte aux pommes"));
        assert_eq!(payload.categorie.as_deref(), Some("cuisine"));
        assert!(matches!(app.form, Form::Submitting(_)));

        app.submit_succeeded();
        assert!(matches!(app.form, Form::Closed));
        assert!(app.take_reload_request());
        assert_eq!(
            app.notification.as_ref().map(|n| n.kind),
            Some(NotificationKind::Success)
        );
    }

    #[test]
    fn rejected_submit_reopens_the_form_with_the_draft() {
        let mut app = App::new();
        app.open_create();
        valid_draft(app.draft_mut().unwrap());
        app.begin_submit().unwrap();

        app.submit_failed("Erreur lors de la sauvegarde de la recette");

        let draft = app.draft_mut().expect("form reopened");
        assert_eq!(draft.titre, "Tarte aux pommes");
    }

    #[test]
    fn image_upload_walks_its_states_and_can_be_removed() {
        let mut app = App::new();
        app.open_create();
        let draft = app.draft_mut().unwrap();

        draft.begin_image_upload();
        assert_eq!(draft.image, ImageSlot::Uploading);

        draft.image_uploaded("/media/uploads/recipe-1-a.png".to_string());
        assert!(matches!(draft.image, ImageSlot::Attached(_)));
        assert!(draft.payload().image_url.is_some());

        draft.remove_image();
        assert_eq!(draft.image, ImageSlot::Idle);
        assert!(draft.payload().image_url.is_none());
    }

    #[test]
    fn failed_image_upload_does_not_attach_a_url() {
        let mut app = App::new();
        app.open_create();
        let draft = app.draft_mut().unwrap();

        draft.begin_image_upload();
        draft.image_upload_failed("Format d'image non reconnu".to_string());

        assert!(matches!(draft.image, ImageSlot::Failed(_)));
        assert!(draft.payload().image_url.is_none());
    }

    #[test]
    fn working_lists_are_edited_in_place() {
        let mut draft = Draft::default();
        draft.add_ingredient("  farine  ");
        draft.add_ingredient("");
        draft.add_ingredient("beurre");
        assert_eq!(draft.ingredients, vec!["farine", "beurre"]);

        draft.remove_ingredient(0);
        assert_eq!(draft.ingredients, vec!["beurre"]);

        // Out-of-range removals are ignored.
        draft.remove_ingredient(5);
        assert_eq!(draft.ingredients, vec!["beurre"]);
    }
}
