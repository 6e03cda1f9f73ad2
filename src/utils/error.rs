use thiserror::Error;

/// Crate-wide error type. Each pipeline stage maps its internal failures
/// into the matching variant with a short human-readable message; nothing
/// beyond that message crosses the API boundary.
#[derive(Debug, Error)]
pub enum CardAuthError {
    #[error("Upload rejected: {0}")]
    Upload(String),
    #[error("Image processing error: {0}")]
    ImageProcessing(String),
    #[error("Recognition error: {0}")]
    Recognition(String),
    #[error("User lookup error: {0}")]
    UserLookup(String),
    #[error("Token issuance error: {0}")]
    TokenIssuance(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CardAuthError {
    /// HTTP status the error maps to: upload constraint violations are the
    /// caller's problem, everything else is a server-side failure.
    pub fn status_code(&self) -> u16 {
        match self {
            CardAuthError::Upload(_) => 400,
            _ => 500,
        }
    }

    /// Wire body for a failed request. Only the short message leaves the
    /// process; internals stay in the logs.
    pub fn to_response(&self) -> serde_json::Value {
        match self {
            CardAuthError::Upload(message) => serde_json::json!({
                "success": false,
                "error": message,
            }),
            other => serde_json::json!({
                "success": false,
                "error": "Card authentication failed",
                "details": other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_errors_are_client_errors() {
        let err = CardAuthError::Upload("No card image provided".to_string());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_response()["error"], "No card image provided");
    }

    #[test]
    fn processing_errors_are_server_errors_with_short_details() {
        let err = CardAuthError::Recognition("engine crashed".to_string());
        assert_eq!(err.status_code(), 500);
        let body = err.to_response();
        assert_eq!(body["error"], "Card authentication failed");
        assert_eq!(body["details"], "Recognition error: engine crashed");
    }
}
