use crate::utils::CardAuthError;

/// Uploads above this size are rejected before any processing.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Card photos arrive as camera output; nothing else is accepted.
pub const ALLOWED_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// One uploaded card image. Lives in memory for the duration of a single
/// login attempt and is never persisted.
#[derive(Debug, Clone)]
pub struct CardUpload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: Option<String>,
}

impl CardUpload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, file_name: Option<String>) -> Self {
        CardUpload {
            bytes,
            mime_type: mime_type.into(),
            file_name,
        }
    }

    /// Enforce the upload constraints. Runs before the pipeline starts so
    /// a bad upload never reaches the image decoder.
    pub fn check(&self) -> Result<(), CardAuthError> {
        if self.bytes.is_empty() {
            return Err(CardAuthError::Upload("No card image provided".to_string()));
        }
        if !ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(CardAuthError::Upload(format!(
                "Unsupported file type '{}'. Use JPEG, PNG or WebP",
                self.mime_type
            )));
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(CardAuthError::Upload(format!(
                "Image exceeds the {} MB limit",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_types_pass() {
        for mime in ALLOWED_MIME_TYPES {
            let upload = CardUpload::new(vec![0u8; 16], mime, None);
            assert!(upload.check().is_ok(), "{} should be accepted", mime);
        }
    }

    #[test]
    fn missing_payload_is_rejected() {
        let upload = CardUpload::new(Vec::new(), "image/png", None);
        let err = upload.check().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn unsupported_type_is_rejected() {
        let upload = CardUpload::new(vec![0u8; 16], "application/pdf", None);
        assert!(upload.check().is_err());
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let upload = CardUpload::new(vec![0u8; MAX_UPLOAD_BYTES + 1], "image/jpeg", None);
        assert!(upload.check().is_err());
    }
}
