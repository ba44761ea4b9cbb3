use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::error::{ProductError, ProductResult};

/// Model name used in store messages
pub const MODEL_NAME: &str = "Product";

/// Keys that address the identifier and are never written from a body
const ID_KEYS: [&str; 2] = ["_id", "id"];

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-generated ObjectId, hex encoded
    #[serde(rename = "_id", alias = "id")]
    #[schema(example = "655511487ac4ffa071ad5011")]
    pub id: String,

    #[schema(example = "Nintendo Switch")]
    pub name: String,

    #[schema(example = "Hybrid home and handheld console")]
    pub description: String,

    /// Any other fields the client sent, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Request body for create. Unknown fields are stored as sent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Nintendo Switch")]
    pub name: String,

    #[schema(example = "Hybrid home and handheld console")]
    pub description: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Request body for update. Every field is optional and only the fields
/// present are written.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Nintendo Switch OLED")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A create payload that passed schema validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub extra: Map<String, Value>,
}

impl NewProduct {
    /// Validate a raw create body.
    ///
    /// `name` and `description` must be present and non-empty once cast to a
    /// string. Every failing field is reported, `name` first:
    /// `Product validation failed: name: Path `name` is required., description: ...`
    pub fn from_fields(mut fields: Map<String, Value>) -> ProductResult<Self> {
        strip_id(&mut fields);

        let mut failures = Vec::new();
        let name = required_string(&mut fields, "name", &mut failures);
        let description = required_string(&mut fields, "description", &mut failures);
        check_field_names(&fields, &mut failures);

        match (name, description) {
            (Some(name), Some(description)) => Ok(Self {
                name,
                description,
                extra: fields,
            }),
            _ => Err(ProductError::Validation(format!(
                "{MODEL_NAME} validation failed: {}",
                failures.join(", ")
            ))),
        }
    }
}

/// Field changes for an update, validated the same way as a create except
/// that every field is optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub extra: Map<String, Value>,
}

impl ProductChanges {
    pub fn from_fields(mut fields: Map<String, Value>) -> ProductResult<Self> {
        strip_id(&mut fields);

        let mut failures = Vec::new();
        let name = optional_string(&mut fields, "name", &mut failures);
        let description = optional_string(&mut fields, "description", &mut failures);
        check_field_names(&fields, &mut failures);

        if !failures.is_empty() {
            return Err(ProductError::Validation(format!(
                "Validation failed: {}",
                failures.join(", ")
            )));
        }

        Ok(Self {
            name,
            description,
            extra: fields,
        })
    }

    /// True when nothing would be written
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.extra.is_empty()
    }
}

fn strip_id(fields: &mut Map<String, Value>) {
    for key in ID_KEYS {
        fields.remove(key);
    }
}

fn required_string(
    fields: &mut Map<String, Value>,
    path: &str,
    failures: &mut Vec<String>,
) -> Option<String> {
    match fields.remove(path) {
        None | Some(Value::Null) => {
            failures.push(required_failure(path));
            None
        }
        Some(value) => checked_string(path, value, failures),
    }
}

fn optional_string(
    fields: &mut Map<String, Value>,
    path: &str,
    failures: &mut Vec<String>,
) -> Option<String> {
    match fields.remove(path) {
        None => None,
        Some(Value::Null) => {
            failures.push(required_failure(path));
            None
        }
        Some(value) => checked_string(path, value, failures),
    }
}

fn checked_string(path: &str, value: Value, failures: &mut Vec<String>) -> Option<String> {
    match cast_string(path, value) {
        Ok(s) if s.is_empty() => {
            failures.push(required_failure(path));
            None
        }
        Ok(s) => Some(s),
        Err(message) => {
            failures.push(format!("{path}: {message}"));
            None
        }
    }
}

/// Field names are stored as-is, so a name must not read as an operator
/// (`$` prefix) or as a nested path (`.`). Nested objects are checked too.
fn check_field_names(fields: &Map<String, Value>, failures: &mut Vec<String>) {
    check_object("", fields, failures);
}

fn check_object(parent: &str, map: &Map<String, Value>, failures: &mut Vec<String>) {
    for (key, value) in map {
        let path = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent}.{key}")
        };

        if key.starts_with('$') || key.contains('.') {
            failures.push(format!(
                "{path}: Field name `{key}` must not start with '$' or contain '.'"
            ));
        } else {
            check_value(&path, value, failures);
        }
    }
}

fn check_value(path: &str, value: &Value, failures: &mut Vec<String>) {
    match value {
        Value::Object(map) => check_object(path, map, failures),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                check_value(&format!("{path}.{index}"), item, failures);
            }
        }
        _ => {}
    }
}

fn required_failure(path: &str) -> String {
    format!("{path}: Path `{path}` is required.")
}

/// Scalars are coerced to their string form; arrays and objects are rejected.
fn cast_string(path: &str, value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => {
            let kind = if other.is_array() { "Array" } else { "Object" };
            Err(format!(
                "Cast to string failed for value \"{other}\" (type {kind}) at path \"{path}\""
            ))
        }
    }
}
