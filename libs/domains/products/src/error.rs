use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// A required field was missing or could not be cast to its type.
    /// Carries the full store message, e.g.
    /// `Product validation failed: description: Path `description` is required.`
    #[error("{0}")]
    Validation(String),

    #[error("Cast to ObjectId failed for value \"{0}\" (type string) at path \"_id\" for model \"Product\"")]
    InvalidId(String),

    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for the uniform error response
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::Validation(msg),
            err @ ProductError::InvalidId(_) => AppError::BadRequest(err.to_string()),
            ProductError::MalformedBody(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
