//! Client-side field validation, run before a form submit is sent.
//! The server applies its own validation as the authoritative backstop;
//! these rules only exist to give inline feedback without a round-trip.

use crate::ui::state::Draft;

pub const TITRE_MIN: usize = 3;
pub const TITRE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 200;
pub const TEMPS_MAX: i32 = 1440;

/// One inline message, keyed by the form field it belongs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

fn error(field: &'static str, message: &str) -> FieldError {
    FieldError {
        field,
        message: message.to_string(),
    }
}

/// All failing rules at once, so every field shows its message in one pass.
pub fn validate(draft: &Draft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let titre_len = draft.titre.trim().chars().count();
    if titre_len < TITRE_MIN || titre_len > TITRE_MAX {
        errors.push(error(
            "titre",
            "Le titre doit contenir entre 3 et 100 caractères",
        ));
    }

    if draft.description.trim().chars().count() > DESCRIPTION_MAX {
        errors.push(error(
            "description",
            "La description ne peut pas dépasser 200 caractères",
        ));
    }

    if draft.categorie.is_none() {
        errors.push(error(
            "categorie",
            "Veuillez sélectionner une catégorie valide",
        ));
    }

    if let Some(temps) = draft.temps_preparation {
        if temps < 1 || temps > TEMPS_MAX {
            errors.push(error(
                "temps_preparation",
                "Le temps doit être entre 1 et 1440 minutes",
            ));
        }
    }

    if draft.ingredients.is_empty() {
        errors.push(error(
            "ingredients",
            "Veuillez ajouter au moins un ingrédient",
        ));
    }

    if draft.instructions.is_empty() {
        errors.push(error(
            "instructions",
            "Veuillez ajouter au moins une instruction",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Categorie;

    fn valid() -> Draft {
        let mut draft = Draft {
            titre: "Tarte Tatin".to_string(),
            categorie: Some(Categorie::Cuisine),
            ..Draft::default()
        };
        draft.add_ingredient("pommes");
        draft.add_instruction("caraméliser");
        draft
    }

    fn fields(draft: &Draft) -> Vec<&'static str> {
        validate(draft).into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn a_complete_draft_passes() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn titre_needs_three_to_one_hundred_chars() {
        let mut draft = valid();
        draft.titre = "ab".to_string();
        assert_eq!(fields(&draft), vec!["titre"]);

        draft.titre = "x".repeat(101);
        assert_eq!(fields(&draft), vec!["titre"]);

        // Length is counted in characters, not bytes.
        draft.titre = "éclair".to_string();
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn description_is_capped_at_two_hundred_chars() {
        let mut draft = valid();
        draft.description = "d".repeat(200);
        assert!(validate(&draft).is_empty());

        draft.description = "d".repeat(201);
        assert_eq!(fields(&draft), vec!["description"]);
    }

    #[test]
    fn categorie_is_required() {
        let mut draft = valid();
        draft.categorie = None;
        assert_eq!(fields(&draft), vec!["categorie"]);
    }

    #[test]
    fn temps_preparation_is_optional_but_bounded() {
        let mut draft = valid();
        draft.temps_preparation = None;
        assert!(validate(&draft).is_empty());

        draft.temps_preparation = Some(0);
        assert_eq!(fields(&draft), vec!["temps_preparation"]);

        draft.temps_preparation = Some(1441);
        assert_eq!(fields(&draft), vec!["temps_preparation"]);

        draft.temps_preparation = Some(1440);
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn both_working_lists_need_at_least_one_entry() {
        let mut draft = valid();
        draft.ingredients.clear();
        draft.instructions.clear();
        assert_eq!(fields(&draft), vec!["ingredients", "instructions"]);
    }
}
