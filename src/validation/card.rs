use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::models::CardData;

lazy_static! {
    static ref MATRICULE_FORMAT: Regex = Regex::new(r"^\d{4}[a-zA-Z]\d{3}$").unwrap();
}

/// Outcome of checking extracted card data. Every rule is evaluated and
/// every violation collected; `is_valid` holds exactly when `errors` is
/// empty.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

pub struct CardDataValidator;

impl CardDataValidator {
    pub fn validate(card_data: &CardData) -> ValidationReport {
        let mut errors = Vec::new();

        match &card_data.matricule {
            None => errors.push("Matricule is missing".to_string()),
            Some(matricule) if !MATRICULE_FORMAT.is_match(matricule) => {
                errors.push("Invalid matricule format".to_string())
            }
            Some(_) => {}
        }

        match &card_data.name {
            Some(name) if name.chars().count() >= 2 => {}
            _ => errors.push("Name is missing or invalid".to_string()),
        }

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
