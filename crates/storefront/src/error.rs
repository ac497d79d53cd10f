//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::ai::GenerationError;
use crate::firestore::FirestoreError;
use crate::listing::ValidationErrors;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document store operation failed.
    #[error("Store error: {0}")]
    Firestore(#[from] FirestoreError),

    /// Identity provider operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Generation API operation failed.
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Listing form validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Firestore(_) | Self::Generation(_) | Self::Session(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Validation failures carry per-field messages in the body
        if let Self::Validation(errors) = &self {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response();
        }

        // Don't expose internal error details to clients. Provider auth
        // rejections are the exception: their raw code is the user message.
        let (status, message) = match &self {
            Self::Firestore(_) => (
                StatusCode::BAD_GATEWAY,
                "External service error".to_string(),
            ),
            Self::Generation(_) => (
                StatusCode::BAD_GATEWAY,
                "Could not generate a response at this time. Please try again.".to_string(),
            ),
            Self::Auth(AuthError::Provider(message)) => {
                (StatusCode::UNAUTHORIZED, message.clone())
            }
            Self::Auth(_) => (
                StatusCode::BAD_GATEWAY,
                "Authentication service unavailable".to_string(),
            ),
            Self::Session(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.clone()),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            // Validation returned above; kept for exhaustiveness
            Self::Validation(errors) => (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an account id.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on sign-out to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::listing::{FieldError, ValidationErrors};

    #[test]
    fn test_auth_provider_error_is_unauthorized() {
        let response =
            AppError::Auth(AuthError::Provider("INVALID_PASSWORD".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_error_is_unprocessable() {
        let response = AppError::Validation(ValidationErrors(vec![FieldError {
            field: "name",
            message: "Product name must be at least 3 characters",
        }]))
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_message() {
        let response = AppError::NotFound("Product".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
