//! Reusable OpenAPI response types.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Any failure: validation, malformed id or body, database error",
    content_type = "application/json",
    example = json!({
        "message": "Product validation failed: description: Path `description` is required."
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
