//! Error types for the identity provider client.

use thiserror::Error;

/// Errors that can occur when talking to the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request. The message is the provider's raw
    /// error code (e.g. `INVALID_PASSWORD`, `EMAIL_EXISTS`) and is shown to
    /// the user as-is.
    #[error("{0}")]
    Provider(String),

    /// Failed to parse the provider's response.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error envelope returned by the provider.
#[derive(Debug, serde::Deserialize)]
pub struct ProviderErrorResponse {
    /// Nested error details.
    pub error: ProviderError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ProviderError {
    /// Raw provider error code.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_surfaced_raw() {
        let err = AuthError::Provider("INVALID_PASSWORD".to_string());
        assert_eq!(err.to_string(), "INVALID_PASSWORD");
    }

    #[test]
    fn test_error_envelope_deserialization() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "EMAIL_NOT_FOUND",
                "errors": [{ "message": "EMAIL_NOT_FOUND", "domain": "global", "reason": "invalid" }]
            }
        }"#;

        let response: ProviderErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error.message, "EMAIL_NOT_FOUND");
    }
}
