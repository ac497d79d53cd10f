//! Encode/decode helpers for the document store's JSON value envelope.
//!
//! Every stored field is wrapped in a single-key object naming its type:
//! `{"stringValue": "..."}`, `{"integerValue": "123"}` (string-encoded),
//! `{"doubleValue": 4.5}`, `{"booleanValue": true}`,
//! `{"timestampValue": "2024-01-01T00:00:00Z"}`,
//! `{"arrayValue": {"values": [...]}}`, `{"mapValue": {"fields": {...}}}`.
//!
//! Decoders return `None` on a type mismatch; callers decide whether to
//! default or reject (see `catalog::decode`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value, json};

/// A document's field map.
pub type Fields = Map<String, Value>;

// =============================================================================
// Encoding
// =============================================================================

/// Encode a string field.
pub fn string(s: impl Into<String>) -> Value {
    json!({ "stringValue": s.into() })
}

/// Encode an integer field. The wire format string-encodes 64-bit integers.
#[must_use]
pub fn integer(i: i64) -> Value {
    json!({ "integerValue": i.to_string() })
}

/// Encode a floating-point field.
#[must_use]
pub fn double(d: f64) -> Value {
    json!({ "doubleValue": d })
}

/// Encode a boolean field.
#[must_use]
pub fn boolean(b: bool) -> Value {
    json!({ "booleanValue": b })
}

/// Encode a timestamp field as RFC 3339 with microsecond precision.
#[must_use]
pub fn timestamp(t: &DateTime<Utc>) -> Value {
    json!({ "timestampValue": t.to_rfc3339_opts(SecondsFormat::Micros, true) })
}

/// Encode an array field.
#[must_use]
pub fn array(values: Vec<Value>) -> Value {
    json!({ "arrayValue": { "values": values } })
}

/// Encode a nested map field.
#[must_use]
pub fn map(fields: Fields) -> Value {
    json!({ "mapValue": { "fields": fields } })
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a string field.
#[must_use]
pub fn as_str(value: &Value) -> Option<&str> {
    value.get("stringValue")?.as_str()
}

/// Decode an integer field.
///
/// Accepts `integerValue` (string-encoded) and integral `doubleValue` - the
/// original browser client stored whole numbers under either envelope
/// depending on how the literal was written.
#[must_use]
pub fn as_i64(value: &Value) -> Option<i64> {
    if let Some(s) = value.get("integerValue").and_then(Value::as_str) {
        return s.parse().ok();
    }
    let d = value.get("doubleValue")?.as_f64()?;
    if d.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&d) {
        #[allow(clippy::cast_possible_truncation)]
        Some(d as i64)
    } else {
        None
    }
}

/// Decode a floating-point field, accepting either numeric envelope.
#[must_use]
pub fn as_f64(value: &Value) -> Option<f64> {
    if let Some(d) = value.get("doubleValue").and_then(Value::as_f64) {
        return Some(d);
    }
    value
        .get("integerValue")?
        .as_str()?
        .parse::<i64>()
        .ok()
        .map(|i| i as f64)
}

/// Decode a boolean field.
#[must_use]
pub fn as_bool(value: &Value) -> Option<bool> {
    value.get("booleanValue")?.as_bool()
}

/// Decode a timestamp field.
#[must_use]
pub fn as_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.get("timestampValue")?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Decode an array field. An empty `arrayValue` omits `values` entirely.
#[must_use]
pub fn as_array(value: &Value) -> Option<Vec<&Value>> {
    let array = value.get("arrayValue")?.as_object()?;
    match array.get("values") {
        Some(values) => Some(values.as_array()?.iter().collect()),
        None => Some(Vec::new()),
    }
}

/// Decode a nested map field.
#[must_use]
pub fn as_map(value: &Value) -> Option<&Fields> {
    value.get("mapValue")?.get("fields")?.as_object()
}
