use serde::Serialize;

use crate::validation::ValidationReport;

/// Fields recovered from a card photo. The two fields are populated
/// independently; extraction never fails outright, it just leaves what it
/// could not find as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardData {
    pub matricule: Option<String>,
    pub name: Option<String>,
}

/// Result of the diagnostic recognition pipeline: extracted fields plus
/// everything a client needs to show the user what was misread.
#[derive(Debug, Clone)]
pub struct CardScan {
    pub data: CardData,
    pub validation: ValidationReport,
    pub raw_text: String,
    pub cleaned_text: String,
}

impl CardScan {
    pub fn status_code(&self) -> u16 {
        if self.validation.is_valid {
            200
        } else {
            422
        }
    }

    pub fn to_response(&self) -> serde_json::Value {
        if self.validation.is_valid {
            serde_json::json!({
                "success": true,
                "message": "Card recognized successfully",
                "data": {
                    "matricule": self.data.matricule,
                    "name": self.data.name,
                    "rawText": self.raw_text,
                    "cleanedText": self.cleaned_text,
                }
            })
        } else {
            serde_json::json!({
                "success": false,
                "message": "Incomplete or invalid card data",
                "errors": self.validation.errors,
                "data": {
                    "matricule": self.data.matricule,
                    "name": self.data.name,
                    "rawText": self.raw_text,
                    "cleanedText": self.cleaned_text,
                }
            })
        }
    }
}

/// A registered account as seen by the card-login pipeline. Read-only
/// here; lookups go through the `UserDirectory` collaborator.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub matricule: String,
    pub class_id: Option<String>,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The slice of a user record that goes back over the wire after a
/// successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub matricule: String,
    pub class_id: Option<String>,
}

impl From<&UserRecord> for PublicProfile {
    fn from(user: &UserRecord) -> Self {
        PublicProfile {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.full_name(),
            role: user.role.to_lowercase(),
            matricule: user.matricule.clone(),
            class_id: user.class_id.clone(),
        }
    }
}

/// What the card itself said, echoed back alongside the session token.
#[derive(Debug, Clone, Serialize)]
pub struct CardInfo {
    pub matricule: String,
    pub name: String,
}
