pub mod handlers;
pub mod messages;
pub mod responses;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response.
///
/// ```json
/// { "message": "Product validation failed: name: Path `name` is required." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub message: String,
}

/// A failure propagated out of a handler.
///
/// The variant only decides how the failure is logged. Every variant is
/// answered the same way: `500 Internal Server Error` with an
/// [`ErrorResponse`] carrying the failure's own message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// The request itself could not be understood (malformed body or id)
    #[error("{0}")]
    BadRequest(String),

    /// The data store rejected the record
    #[error("{0}")]
    Validation(String),

    /// The data store could not be reached or failed internally
    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl AppError {
    /// The message reported to the client, never empty.
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            messages::INTERNAL_ERROR.to_string()
        } else {
            message
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.message();

        match &self {
            AppError::BadRequest(_) => tracing::warn!(%message, "Rejected malformed request"),
            AppError::Validation(_) => tracing::warn!(%message, "Validation failed"),
            AppError::Database(_) => tracing::error!(%message, "Database error"),
            AppError::InternalServerError(_) => tracing::error!(%message, "Internal server error"),
        }

        error_response(message)
    }
}

/// Build the uniform `500 {"message": ...}` response.
pub fn error_response(message: impl Into<String>) -> Response {
    let body = Json(ErrorResponse {
        message: message.into(),
    });

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
