//! Coercion of an untrusted parsed candidate into a [`ClassificationRecord`].
//!
//! [`coerce`] is total: every possible [`Value`] shape (null, arrays,
//! numbers, objects with missing or wrong-typed fields) produces a
//! schema-valid record. Each field is defaulted independently, so one bad
//! field never poisons the others.

use ecoscan_core::{
    ClassificationRecord, Confidence, Material, MAX_ITEM_NAME_CHARS, UNKNOWN_ITEM_NAME,
};
use serde_json::Value;

/// Result of coercing a candidate value.
///
/// `corrected` is true when the coerced record differs from the candidate by
/// deep structural comparison. `recyclable_type` records the JSON type the
/// model used for the `recyclable` field, for operator diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coerced {
    /// The schema-valid record
    pub record: ClassificationRecord,
    /// Whether any field had to be corrected
    pub corrected: bool,
    /// JSON type name of the candidate's `recyclable` field
    pub recyclable_type: &'static str,
}

/// Coerce an untrusted candidate into a schema-valid record.
///
/// This function never fails. Field rules:
///
/// - `item_name`: non-empty string, truncated to the first
///   [`MAX_ITEM_NAME_CHARS`] characters; any other shape defaults to
///   `"Unknown Item"`.
/// - `material`: exact wire name of a known material; otherwise `composite`.
/// - `recyclable`: native boolean passes through; the string `"true"`
///   (case-insensitive) is `true`; anything else is `false`.
/// - `confidence`: exact wire name of a known bucket; otherwise `low`.
#[must_use]
pub fn coerce(candidate: &Value) -> Coerced {
    let fields = candidate.as_object();
    let field = |key: &str| fields.and_then(|map| map.get(key));

    let item_name = match field("item_name") {
        Some(Value::String(name)) if !name.is_empty() => {
            name.chars().take(MAX_ITEM_NAME_CHARS).collect()
        }
        _ => UNKNOWN_ITEM_NAME.to_string(),
    };

    let material = field("material")
        .and_then(Value::as_str)
        .and_then(Material::parse)
        .unwrap_or_default();

    let recyclable = match field("recyclable") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text.eq_ignore_ascii_case("true"),
        _ => false,
    };

    let confidence = field("confidence")
        .and_then(Value::as_str)
        .and_then(Confidence::parse)
        .unwrap_or_default();

    let record = ClassificationRecord {
        item_name,
        material,
        recyclable,
        confidence,
    };

    Coerced {
        corrected: !matches_record(candidate, &record),
        recyclable_type: json_type_name(field("recyclable")),
        record,
    }
}

/// Deep structural comparison: does the candidate hold exactly the four
/// contract fields with exactly the coerced values?
fn matches_record(candidate: &Value, record: &ClassificationRecord) -> bool {
    let Some(map) = candidate.as_object() else {
        return false;
    };

    map.len() == 4
        && map.get("item_name").and_then(Value::as_str) == Some(record.item_name.as_str())
        && map.get("material").and_then(Value::as_str) == Some(record.material.as_str())
        && map.get("recyclable").and_then(Value::as_bool) == Some(record.recyclable)
        && map.get("confidence").and_then(Value::as_str) == Some(record.confidence.as_str())
}

/// JSON type name for diagnostics.
fn json_type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "absent",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
