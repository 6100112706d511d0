//! Attribute projection
//!
//! Records declare their fields through `Serialize`; this module turns that into
//! [`Attributes`] with one naming rule applied everywhere: the first letter of
//! every key is lower-cased (`ConnectionId` -> `connectionId`, `VLAN` -> `vLAN`).

use super::item::Attributes;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A record could not be represented as attributes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ProjectionError(pub String);

/// Lower-case the first character of an attribute name
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Project a record into attributes
///
/// Top-level fields named in `exclude` are skipped (compared case-insensitively
/// after normalisation). Null fields are dropped.
pub fn to_attributes<T: Serialize>(
    record: &T,
    exclude: &[&str],
) -> Result<Attributes, ProjectionError> {
    let value = serde_json::to_value(record).map_err(|e| ProjectionError(e.to_string()))?;

    let Value::Object(fields) = value else {
        return Err(ProjectionError(format!(
            "expected a struct, got {}",
            kind_of(&value)
        )));
    };

    let mut attributes = Attributes::new();
    for (name, value) in fields {
        let name = lower_first(&name);
        if value.is_null() || exclude.iter().any(|e| e.eq_ignore_ascii_case(&name)) {
            continue;
        }
        attributes.insert(name, normalise(value));
    }

    Ok(attributes)
}

fn normalise(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (lower_first(&k), normalise(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(values) => Value::Array(values.into_iter().map(normalise).collect()),
        other => other,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
