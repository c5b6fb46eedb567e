//! Error types for Driftpub
//!
//! All errors in the application are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-wide error type
///
/// This enum represents all possible errors that can occur
/// in the application. It implements `IntoResponse` to
/// automatically convert errors to appropriate HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found (404)
    #[error("not found")]
    NotFound,

    /// Malformed request body (400)
    #[error("invalid request")]
    InvalidRequest,

    /// Activity type the inbox does not handle (400)
    #[error("unsupported type: {0:?}")]
    UnsupportedType(String),

    /// Outbound delivery of a federation message failed (500)
    ///
    /// The cause is logged for the operator; the remote caller only
    /// ever sees a generic error body.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// Configuration error (500)
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// Maps each error variant to the appropriate HTTP status code
    /// and JSON error body. Internal causes are never exposed to the
    /// remote peer.
    fn into_response(self) -> Response {
        use axum::Json;

        let (status, error_message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            AppError::InvalidRequest => (StatusCode::BAD_REQUEST, "invalid request".to_string()),
            AppError::UnsupportedType(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Delivery(detail) => {
                tracing::error!(%detail, "outbound delivery failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Config(detail) => {
                tracing::error!(%detail, "configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Internal(cause) => {
                tracing::error!(%cause, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
