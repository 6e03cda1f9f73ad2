use std::io::Write;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tempfile::NamedTempFile;
use tesseract::{PageSegMode, Tesseract};

use crate::utils::CardAuthError;

/// Character whitelist for card recognition: Latin letters, digits, the
/// accented vowels/consonants found on the cards, and the punctuation the
/// field labels use.
pub const CARD_CHAR_WHITELIST: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789àáâãäåæçèéêëìíîïðñòóôõöùúûüýÿ ():.-";

/// Recognition languages: the cards carry both French and English labels.
pub const CARD_LANGUAGES: &str = "fra+eng";

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub languages: String,
    pub char_whitelist: String,
    /// Wall-clock bound on one recognition call. Recognition latency
    /// dominates the pipeline; without a bound an unresponsive engine
    /// hangs the request indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        OcrConfig {
            languages: CARD_LANGUAGES.to_string(),
            char_whitelist: CARD_CHAR_WHITELIST.to_string(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// TextRecognizer runs Tesseract over a preprocessed card image and
/// returns everything it could read as one text block.
pub struct TextRecognizer {
    config: OcrConfig,
}

impl TextRecognizer {
    pub fn new(config: OcrConfig) -> Self {
        TextRecognizer { config }
    }

    /// Recognize text in the processed image bytes. With a configured
    /// timeout the engine runs on its own thread and an expired wait is
    /// reported as a recognition failure; the stray recognition is
    /// abandoned, not cancelled.
    pub fn recognize(&self, image_data: &[u8]) -> Result<String, CardAuthError> {
        log::info!("recognition started ({})", self.config.languages);
        let text = match self.config.timeout {
            None => Self::run_engine(image_data, &self.config.languages, &self.config.char_whitelist)?,
            Some(timeout) => {
                let bytes = image_data.to_vec();
                let languages = self.config.languages.clone();
                let whitelist = self.config.char_whitelist.clone();
                let (tx, rx) = mpsc::channel();
                thread::Builder::new()
                    .name("card-ocr".to_string())
                    .spawn(move || {
                        let _ = tx.send(Self::run_engine(&bytes, &languages, &whitelist));
                    })
                    .map_err(|e| {
                        CardAuthError::Recognition(format!("failed to spawn recognition thread: {}", e))
                    })?;
                match rx.recv_timeout(timeout) {
                    Ok(result) => result?,
                    Err(_) => {
                        return Err(CardAuthError::Recognition(format!(
                            "recognition timed out after {}s",
                            timeout.as_secs()
                        )))
                    }
                }
            }
        };
        log::info!("recognition complete: {} chars", text.len());
        log::debug!("raw recognition output:\n{}", text);
        Ok(text)
    }

    fn run_engine(
        image_data: &[u8],
        languages: &str,
        whitelist: &str,
    ) -> Result<String, CardAuthError> {
        // Tesseract reads from a path, so the bytes go through a temp file.
        let mut temp_file = NamedTempFile::new()
            .map_err(|e| CardAuthError::Recognition(format!("failed to create temp file: {}", e)))?;
        temp_file
            .write_all(image_data)
            .map_err(|e| CardAuthError::Recognition(format!("failed to write temp file: {}", e)))?;
        let path_str = temp_file
            .path()
            .to_str()
            .ok_or_else(|| CardAuthError::Recognition("temp path is not valid UTF-8".to_string()))?;

        let mut tess = Tesseract::new(None, Some(languages))
            .map_err(|e| CardAuthError::Recognition(format!("failed to initialize Tesseract: {}", e)))?
            .set_variable("tessedit_char_whitelist", whitelist)
            .map_err(|e| CardAuthError::Recognition(format!("failed to set whitelist: {}", e)))?;

        tess.set_page_seg_mode(PageSegMode::PsmAuto);

        let mut tess = tess
            .set_image(path_str)
            .map_err(|e| CardAuthError::Recognition(format!("failed to set image: {}", e)))?;

        tess.get_text()
            .map_err(|e| CardAuthError::Recognition(format!("text extraction failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_bilingual_with_the_card_whitelist() {
        let config = OcrConfig::default();
        assert_eq!(config.languages, "fra+eng");
        assert!(config.char_whitelist.contains("é"));
        assert!(config.char_whitelist.contains("():.-"));
        // MRZ filler has no business on a student card
        assert!(!config.char_whitelist.contains('<'));
        assert!(config.timeout.is_some());
    }
}
