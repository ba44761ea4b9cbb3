use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorResponse, messages};

/// Fallback for requests that match no route.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse {
        message: messages::ROUTE_NOT_FOUND.to_string(),
    });

    (StatusCode::NOT_FOUND, body).into_response()
}
