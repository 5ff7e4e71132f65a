//! Recipe store: the five operations the API maps onto, over a single
//! `recettes` table. Validation of required fields happens here so every
//! caller gets the same 400/404 semantics.

use chrono::Utc;
use diesel::prelude::*;
use thiserror::Error;

use crate::models::{Categorie, Difficulte, NewRecette, Recette, RecetteDraft, RecetteRow};
use crate::schema::recettes;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Recette non trouvée")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// List filter. `categorie` is an exact match (the API layer strips the
/// `all` sentinel before it gets here); `search` is a substring match on
/// titre or description, case-insensitive for ASCII under SQLite's default
/// LIKE collation.
#[derive(Debug, Default)]
pub struct RecetteFilter {
    pub categorie: Option<String>,
    pub search: Option<String>,
}

/// Validated create/update fields, derived from a [`RecetteDraft`]
/// with the documented defaults applied.
struct Validated {
    titre: String,
    description: String,
    categorie: Categorie,
    temps_preparation: i32,
    difficulte: Difficulte,
    emoji: String,
    ingredients: String,
    instructions: String,
    image_url: Option<String>,
}

fn validate(draft: &RecetteDraft) -> Result<Validated, StoreError> {
    let titre = draft.titre.as_deref().map(str::trim).unwrap_or("");
    let categorie = draft.categorie.as_deref().unwrap_or("");
    if titre.is_empty() || categorie.is_empty() {
        return Err(StoreError::Validation(
            "Titre et catégorie sont requis".to_string(),
        ));
    }

    let categorie = Categorie::parse(categorie)
        .ok_or_else(|| StoreError::Validation("Catégorie invalide".to_string()))?;

    let difficulte = match draft.difficulte.as_deref() {
        None | Some("") => Difficulte::default(),
        Some(s) => Difficulte::parse(s)
            .ok_or_else(|| StoreError::Validation("Difficulté invalide".to_string()))?,
    };

    let emoji = draft
        .emoji
        .clone()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| categorie.default_emoji().to_string());

    let encode = |list: Option<&Vec<String>>| {
        serde_json::to_string(list.map(Vec::as_slice).unwrap_or(&[]))
            .map_err(|_| StoreError::Validation("Format de liste invalide".to_string()))
    };

    Ok(Validated {
        titre: titre.to_string(),
        description: draft.description.clone().unwrap_or_default(),
        categorie,
        temps_preparation: draft.temps_preparation.unwrap_or(0),
        difficulte,
        emoji,
        ingredients: encode(draft.ingredients.as_ref())?,
        instructions: encode(draft.instructions.as_ref())?,
        image_url: draft.image_url.clone().filter(|u| !u.is_empty()),
    })
}

/// Full filtered listing, newest-created first. No pagination.
pub fn list(conn: &mut SqliteConnection, filter: &RecetteFilter) -> Result<Vec<Recette>, StoreError> {
    let mut query = recettes::table.into_boxed();

    if let Some(ref categorie) = filter.categorie {
        query = query.filter(recettes::categorie.eq(categorie.clone()));
    }

    if let Some(ref term) = filter.search {
        let pattern = format!("%{term}%");
        query = query.filter(
            recettes::titre
                .like(pattern.clone())
                .or(recettes::description.like(pattern)),
        );
    }

    let rows: Vec<RecetteRow> = query
        .order(recettes::date_creation.desc())
        .select(RecetteRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Recette::from).collect())
}

pub fn get(conn: &mut SqliteConnection, id: i32) -> Result<Recette, StoreError> {
    let row: RecetteRow = recettes::table
        .find(id)
        .select(RecetteRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound)?;

    Ok(row.into())
}

/// Insert a new recipe with defaults applied and both timestamps set to now.
/// Returns the assigned id.
pub fn create(
    conn: &mut SqliteConnection,
    draft: &RecetteDraft,
) -> Result<i32, StoreError> {
    let v = validate(draft)?;
    let now = Utc::now().naive_utc();

    let new = NewRecette {
        titre: &v.titre,
        description: &v.description,
        categorie: v.categorie,
        temps_preparation: v.temps_preparation,
        difficulte: v.difficulte,
        ingredients: &v.ingredients,
        instructions: &v.instructions,
        emoji: &v.emoji,
        image_url: v.image_url.as_deref(),
        date_creation: now,
        date_modification: now,
    };

    let id = diesel::insert_into(recettes::table)
        .values(&new)
        .returning(recettes::id)
        .get_result(conn)?;

    Ok(id)
}

/// Full replace of every mutable field. `date_creation` is left alone,
/// `date_modification` is refreshed. Partial updates are not supported.
pub fn update(
    conn: &mut SqliteConnection,
    id: i32,
    draft: &RecetteDraft,
) -> Result<(), StoreError> {
    let v = validate(draft)?;
    let now = Utc::now().naive_utc();

    let updated = diesel::update(recettes::table.find(id))
        .set((
            recettes::titre.eq(&v.titre),
            recettes::description.eq(&v.description),
            recettes::categorie.eq(v.categorie),
            recettes::temps_preparation.eq(v.temps_preparation),
            recettes::difficulte.eq(v.difficulte),
            recettes::ingredients.eq(&v.ingredients),
            recettes::instructions.eq(&v.instructions),
            recettes::emoji.eq(&v.emoji),
            recettes::image_url.eq(v.image_url.as_deref()),
            recettes::date_modification.eq(now),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(StoreError::NotFound);
    }

    Ok(())
}

/// Remove the row and report its former image_url so the caller can
/// schedule best-effort removal of the file. The two steps are not a
/// transaction: an orphaned image file is an accepted outcome.
pub fn delete(conn: &mut SqliteConnection, id: i32) -> Result<Option<String>, StoreError> {
    let image_url: Option<String> = recettes::table
        .find(id)
        .select(recettes::image_url)
        .first(conn)
        .optional()?
        .ok_or(StoreError::NotFound)?;

    let deleted = diesel::delete(recettes::table.find(id)).execute(conn)?;
    if deleted == 0 {
        return Err(StoreError::NotFound);
    }

    Ok(image_url)
}
