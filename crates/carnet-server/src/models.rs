use chrono::NaiveDateTime;
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Recipe class. Stored as text, constrained by a CHECK at the schema level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow, Serialize, Deserialize, ToSchema)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum Categorie {
    Cuisine,
    Cocktails,
}

impl Categorie {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cuisine" => Some(Categorie::Cuisine),
            "cocktails" => Some(Categorie::Cocktails),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Categorie::Cuisine => "cuisine",
            Categorie::Cocktails => "cocktails",
        }
    }

    /// Fallback emoji used when a recipe is written without one.
    pub fn default_emoji(&self) -> &'static str {
        match self {
            Categorie::Cuisine => "🍽️",
            Categorie::Cocktails => "🍹",
        }
    }
}

impl FromSql<Text, Sqlite> for Categorie {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Categorie::parse(&s).ok_or_else(|| format!("unrecognized categorie: {s}").into())
    }
}

impl ToSql<Text, Sqlite> for Categorie {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

/// Difficulty level. Wire values are the French labels used by the client.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, AsExpression, FromSqlRow, Serialize, Deserialize, ToSchema,
)]
#[diesel(sql_type = Text)]
pub enum Difficulte {
    #[default]
    Facile,
    Moyen,
    Difficile,
}

impl Difficulte {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Facile" => Some(Difficulte::Facile),
            "Moyen" => Some(Difficulte::Moyen),
            "Difficile" => Some(Difficulte::Difficile),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulte::Facile => "Facile",
            Difficulte::Moyen => "Moyen",
            Difficulte::Difficile => "Difficile",
        }
    }
}

impl FromSql<Text, Sqlite> for Difficulte {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Difficulte::parse(&s).ok_or_else(|| format!("unrecognized difficulte: {s}").into())
    }
}

impl ToSql<Text, Sqlite> for Difficulte {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

/// A recipe as stored, with the list fields still JSON-encoded.
/// Only the store reads these; everything else sees [`Recette`].
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recettes)]
#[diesel(check_for_backend(Sqlite))]
pub struct RecetteRow {
    pub id: i32,
    pub titre: String,
    pub description: String,
    pub categorie: Categorie,
    pub temps_preparation: i32,
    pub difficulte: Difficulte,
    pub ingredients: String,
    pub instructions: String,
    pub emoji: String,
    pub date_creation: NaiveDateTime,
    pub date_modification: NaiveDateTime,
    pub image_url: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recettes)]
pub struct NewRecette<'a> {
    pub titre: &'a str,
    pub description: &'a str,
    pub categorie: Categorie,
    pub temps_preparation: i32,
    pub difficulte: Difficulte,
    pub ingredients: &'a str,
    pub instructions: &'a str,
    pub emoji: &'a str,
    pub image_url: Option<&'a str>,
    pub date_creation: NaiveDateTime,
    pub date_modification: NaiveDateTime,
}

/// A recipe as exposed over the API: list fields decoded to ordered
/// sequences, enums typed. Field names are the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Recette {
    pub id: i32,
    pub titre: String,
    pub description: String,
    pub categorie: Categorie,
    pub temps_preparation: i32,
    pub difficulte: Difficulte,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub emoji: String,
    pub image_url: Option<String>,
    pub date_creation: NaiveDateTime,
    pub date_modification: NaiveDateTime,
}

impl From<RecetteRow> for Recette {
    fn from(row: RecetteRow) -> Self {
        Recette {
            id: row.id,
            titre: row.titre,
            description: row.description,
            categorie: row.categorie,
            temps_preparation: row.temps_preparation,
            difficulte: row.difficulte,
            ingredients: serde_json::from_str(&row.ingredients).unwrap_or_default(),
            instructions: serde_json::from_str(&row.instructions).unwrap_or_default(),
            emoji: row.emoji,
            image_url: row.image_url,
            date_creation: row.date_creation,
            date_modification: row.date_modification,
        }
    }
}

/// Incoming recipe fields for create and full-replace update.
/// Everything is optional at the serde level; the store decides what is
/// required so that a missing field yields a 400, not a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RecetteDraft {
    pub titre: Option<String>,
    pub description: Option<String>,
    pub categorie: Option<String>,
    pub temps_preparation: Option<i32>,
    pub difficulte: Option<String>,
    pub emoji: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub image_url: Option<String>,
}
