//! Schema-free JSON object body extractor.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde_json::{Map, Value};

/// The request body as an arbitrary JSON object.
///
/// No schema is applied here; the data store decides what a valid record
/// looks like. Only `application/json` bodies are parsed. Any other
/// `Content-Type`, a missing one, or an empty body is read as `{}`. A JSON
/// body that does not parse, or is not an object, is rejected with
/// [`AppError::BadRequest`], which the error responder turns into a `500`
/// like any other failure.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonObject;
///
/// async fn create(JsonObject(fields): JsonObject) -> String {
///     format!("{} fields", fields.len())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(JsonObject(Map::new()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        parse_object(&bytes).map(JsonObject)
    }
}

/// `application/json`, parameters such as `charset` allowed
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AppError::BadRequest(format!(
            "Request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(AppError::BadRequest(format!("Malformed JSON body: {}", e))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(
        content_type: Option<&str>,
        body: &'static str,
    ) -> Result<JsonObject, AppError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        JsonObject::from_request(builder.body(Body::from(body)).unwrap(), &()).await
    }

    #[tokio::test]
    async fn test_json_content_type_is_parsed() {
        let JsonObject(map) = extract(Some("application/json; charset=utf-8"), r#"{"name":"n"}"#)
            .await
            .unwrap();
        assert_eq!(map["name"], "n");
    }

    #[tokio::test]
    async fn test_other_content_types_read_as_empty_object() {
        let body = r#"{"name":"n","description":"d"}"#;

        let JsonObject(map) = extract(Some("text/plain"), body).await.unwrap();
        assert!(map.is_empty());

        let JsonObject(map) = extract(None, body).await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_body_is_ignored_without_json_content_type() {
        let JsonObject(map) = extract(Some("text/plain"), "not json").await.unwrap();
        assert!(map.is_empty());

        let err = extract(Some("application/json"), "not json").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_empty_body_is_an_empty_object() {
        assert!(parse_object(b"").unwrap().is_empty());
        assert!(parse_object(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn test_object_body_is_kept_verbatim() {
        let map = parse_object(br#"{"name":"Gloves","price":15,"tags":["winter"]}"#).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["price"], serde_json::json!(15));
    }

    #[test]
    fn test_array_body_is_rejected() {
        let err = parse_object(b"[1, 2]").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let err = parse_object(b"{\"name\": ").unwrap_err();
        assert!(err.to_string().starts_with("Malformed JSON body"));
    }
}
