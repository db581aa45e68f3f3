//! Error types for the Verity SDK.

use thiserror::Error;
use verity_domain::StoreError;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// The backend has no claim for this slug
    #[error("Claim not found: {0}")]
    NotFound(String),

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code
        status: u16,
        /// Error text from the body, or the status reason
        message: String,
    },

    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body could not be understood
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The backend answered but refused the request
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Input failed client-side validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SdkError {
    /// Map a `success: false` envelope to an error
    pub(crate) fn from_envelope(error: Option<String>, fallback: &str) -> Self {
        let message = error.unwrap_or_else(|| fallback.to_string());
        if message.to_lowercase().contains("not found") {
            SdkError::NotFound(message)
        } else {
            SdkError::Rejected(message)
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Decode(format!("JSON parsing error: {}", e))
    }
}

impl StoreError for SdkError {
    fn is_not_found(&self) -> bool {
        matches!(self, SdkError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_not_found() {
        let err = SdkError::from_envelope(Some("Claim not found".to_string()), "x");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_envelope_fallback() {
        let err = SdkError::from_envelope(None, "Failed to create claim");
        assert!(matches!(err, SdkError::Rejected(ref m) if m == "Failed to create claim"));
        assert!(!err.is_not_found());
    }
}
