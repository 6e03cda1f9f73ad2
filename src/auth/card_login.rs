use serde_json::json;

use crate::auth::upload::CardUpload;
use crate::auth::{TokenIssuer, UserDirectory};
use crate::matching::{IdentityMatcher, MatcherConfig};
use crate::models::{CardData, CardInfo, CardScan, PublicProfile};
use crate::processing::image::DEFAULT_MAX_WIDTH;
use crate::processing::{
    FieldExtractor, ImagePreprocessor, OcrConfig, TextNormalizer, TextRecognizer,
};
use crate::utils::CardAuthError;
use crate::validation::CardDataValidator;

/// Everything the pipeline needs, passed in explicitly at construction.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub max_width: u32,
    pub ocr: OcrConfig,
    pub matcher: MatcherConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_width: DEFAULT_MAX_WIDTH,
            ocr: OcrConfig::default(),
            matcher: MatcherConfig::default(),
        }
    }
}

/// Terminal result of one card-login attempt. Rejections are ordinary
/// results, not errors; only infrastructure failures surface as
/// `CardAuthError`.
#[derive(Debug)]
pub enum CardLoginOutcome {
    Authenticated {
        user: PublicProfile,
        token: String,
        card_info: CardInfo,
    },
    /// Extraction came back short; carries the full diagnostics so a
    /// client can show what was misread.
    InvalidCardData {
        errors: Vec<String>,
        extracted: CardData,
        raw_text: String,
        cleaned_text: String,
    },
    UnknownMatricule {
        extracted: CardData,
    },
    NameMismatch {
        expected_name: String,
        card_name: String,
    },
}

impl CardLoginOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            CardLoginOutcome::Authenticated { .. } => 200,
            CardLoginOutcome::InvalidCardData { .. } => 422,
            CardLoginOutcome::UnknownMatricule { .. } => 404,
            CardLoginOutcome::NameMismatch { .. } => 401,
        }
    }

    pub fn to_response(&self) -> serde_json::Value {
        match self {
            CardLoginOutcome::Authenticated {
                user,
                token,
                card_info,
            } => json!({
                "success": true,
                "message": "Card authentication successful",
                "data": {
                    "user": user,
                    "token": token,
                    "cardInfo": card_info,
                }
            }),
            CardLoginOutcome::InvalidCardData {
                errors,
                extracted,
                raw_text,
                cleaned_text,
            } => json!({
                "success": false,
                "error": "Unable to extract the required card information",
                "errors": errors,
                "extractedData": extracted,
                "rawText": raw_text,
                "cleanedText": cleaned_text,
            }),
            CardLoginOutcome::UnknownMatricule { extracted } => json!({
                "success": false,
                "error": "No account found for this matricule. Please contact the administration",
                "extractedData": extracted,
            }),
            CardLoginOutcome::NameMismatch {
                expected_name,
                card_name,
            } => json!({
                "success": false,
                "error": "Card information does not match the registered account",
                "details": {
                    "expectedName": expected_name,
                    "cardName": card_name,
                }
            }),
        }
    }
}

/// CardLoginService sequences the whole card-login pipeline: upload check,
/// preprocessing, recognition, cleanup, extraction, validation, account
/// lookup, fuzzy name match, token issuance. One attempt runs strictly
/// sequentially; nothing is retried or cached across attempts.
pub struct CardLoginService<D, T> {
    config: PipelineConfig,
    recognizer: TextRecognizer,
    matcher: IdentityMatcher,
    users: D,
    tokens: T,
}

impl<D: UserDirectory, T: TokenIssuer> CardLoginService<D, T> {
    pub fn new(config: PipelineConfig, users: D, tokens: T) -> Self {
        let recognizer = TextRecognizer::new(config.ocr.clone());
        let matcher = IdentityMatcher::new(config.matcher.clone());
        CardLoginService {
            config,
            recognizer,
            matcher,
            users,
            tokens,
        }
    }

    /// Full card login from an uploaded photo.
    pub fn login(&self, upload: &CardUpload) -> Result<CardLoginOutcome, CardAuthError> {
        let raw_text = self.recognize_upload(upload)?;
        self.login_from_text(&raw_text)
    }

    /// Diagnostic recognition: the same pipeline minus account lookup and
    /// name matching.
    pub fn scan(&self, upload: &CardUpload) -> Result<CardScan, CardAuthError> {
        let raw_text = self.recognize_upload(upload)?;
        Ok(self.scan_text(&raw_text))
    }

    /// The deterministic tail of the pipeline, from raw recognized text to
    /// a terminal outcome.
    pub fn login_from_text(&self, raw_text: &str) -> Result<CardLoginOutcome, CardAuthError> {
        let scan = self.scan_text(raw_text);

        if !scan.validation.is_valid {
            log::warn!("card data rejected: {:?}", scan.validation.errors);
            return Ok(CardLoginOutcome::InvalidCardData {
                errors: scan.validation.errors,
                extracted: scan.data,
                raw_text: scan.raw_text,
                cleaned_text: scan.cleaned_text,
            });
        }

        let (Some(matricule), Some(card_name)) =
            (scan.data.matricule.clone(), scan.data.name.clone())
        else {
            return Err(CardAuthError::Internal(
                "validated card data is missing required fields".to_string(),
            ));
        };

        let Some(user) = self.users.find_by_matricule(&matricule)? else {
            log::warn!("no account for matricule {}", matricule);
            return Ok(CardLoginOutcome::UnknownMatricule {
                extracted: scan.data,
            });
        };

        let expected_name = user.full_name().to_uppercase();
        let card_name = card_name.to_uppercase();
        if !self.matcher.names_match(&expected_name, &card_name) {
            log::warn!(
                "card name does not match account: expected {:?}, card {:?}",
                expected_name,
                card_name
            );
            return Ok(CardLoginOutcome::NameMismatch {
                expected_name,
                card_name,
            });
        }

        let token = self.tokens.issue_token(&user.id)?;
        log::info!("card authentication succeeded for {}", user.email);
        Ok(CardLoginOutcome::Authenticated {
            user: PublicProfile::from(&user),
            token,
            card_info: CardInfo {
                matricule,
                name: card_name,
            },
        })
    }

    /// Cleanup, extraction and validation over raw recognized text.
    pub fn scan_text(&self, raw_text: &str) -> CardScan {
        let cleaned_text = TextNormalizer::clean(raw_text);
        let data = FieldExtractor::extract(&cleaned_text);
        let validation = CardDataValidator::validate(&data);
        CardScan {
            data,
            validation,
            raw_text: raw_text.to_string(),
            cleaned_text,
        }
    }

    /// Service banner for the diagnostic surface.
    pub fn service_info(&self) -> serde_json::Value {
        let languages: Vec<&str> = self.config.ocr.languages.split('+').collect();
        json!({
            "success": true,
            "message": "Card recognition service is available",
            "supportedLanguages": languages,
        })
    }

    fn recognize_upload(&self, upload: &CardUpload) -> Result<String, CardAuthError> {
        upload.check()?;
        log::info!(
            "card image received: {} bytes, {}",
            upload.bytes.len(),
            upload.mime_type
        );
        let processed = ImagePreprocessor::preprocess(&upload.bytes, self.config.max_width)?;
        self.recognizer.recognize(&processed)
    }
}
