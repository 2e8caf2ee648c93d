//! Field extraction combinators over a JSON object.
//!
//! Every message codec is assembled from these primitives: pull a named
//! field out of a document, run a typed sub-parser over the raw value, and
//! report a field-scoped [`ParseError`] on failure. Sub-parsers return
//! `Result<T, String>`; the combinators attach the field name and its
//! human-readable description to the reason.
//!
//! All functions here are pure: no side effects, no panics on malformed
//! input.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{ParseError, ParseResult};

/// Returns the document as a non-empty JSON object.
///
/// Null or empty-object documents yield the fixed
/// [`ParseError::EmptyDocument`]; a document of any other JSON type is a
/// fault above field-level parsing and yields [`ParseError::Unexpected`].
pub fn object(document: &Value) -> ParseResult<&Map<String, Value>> {
    match document {
        Value::Object(map) if !map.is_empty() => Ok(map),
        Value::Object(_) | Value::Null => Err(ParseError::EmptyDocument),
        other => Err(ParseError::Unexpected(format!(
            "expected a JSON object, found {}",
            json_type(other)
        ))),
    }
}

/// Extracts a mandatory singular field.
///
/// Fails if the field is absent or the sub-parser rejects the raw value.
pub fn mandatory<T>(
    object: &Map<String, Value>,
    field: &'static str,
    what: &'static str,
    sub: impl FnOnce(&Value) -> Result<T, String>,
) -> ParseResult<T> {
    match object.get(field) {
        None => Err(ParseError::field(field, what, "field is missing")),
        Some(raw) => sub(raw).map_err(|reason| ParseError::field(field, what, reason)),
    }
}

/// Extracts an optional singular field.
///
/// An absent (or explicit null) field yields the given default; a present
/// field must still satisfy the sub-parser.
pub fn optional<T>(
    object: &Map<String, Value>,
    field: &'static str,
    what: &'static str,
    default: T,
    sub: impl FnOnce(&Value) -> Result<T, String>,
) -> ParseResult<T> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(raw) => sub(raw).map_err(|reason| ParseError::field(field, what, reason)),
    }
}

/// Extracts a mandatory sequence field, preserving wire order.
///
/// Any single element failing its sub-parser fails the whole field.
pub fn mandatory_seq<T>(
    object: &Map<String, Value>,
    field: &'static str,
    what: &'static str,
    sub: impl Fn(&Value) -> Result<T, String>,
) -> ParseResult<Vec<T>> {
    match object.get(field) {
        None => Err(ParseError::field(field, what, "field is missing")),
        Some(raw) => elements(raw, &sub).map_err(|reason| ParseError::field(field, what, reason)),
    }
}

/// Extracts an optional sequence field; absence yields an empty sequence.
pub fn optional_seq<T>(
    object: &Map<String, Value>,
    field: &'static str,
    what: &'static str,
    sub: impl Fn(&Value) -> Result<T, String>,
) -> ParseResult<Vec<T>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(raw) => elements(raw, &sub).map_err(|reason| ParseError::field(field, what, reason)),
    }
}

/// Extracts a mandatory set field, deduplicating elements.
pub fn mandatory_set<T: Eq + Hash>(
    object: &Map<String, Value>,
    field: &'static str,
    what: &'static str,
    sub: impl Fn(&Value) -> Result<T, String>,
) -> ParseResult<HashSet<T>> {
    mandatory_seq(object, field, what, sub).map(|seq| seq.into_iter().collect())
}

/// Extracts an optional set field; absence yields an empty set.
pub fn optional_set<T: Eq + Hash>(
    object: &Map<String, Value>,
    field: &'static str,
    what: &'static str,
    sub: impl Fn(&Value) -> Result<T, String>,
) -> ParseResult<HashSet<T>> {
    optional_seq(object, field, what, sub).map(|seq| seq.into_iter().collect())
}

/// Extracts a mandatory nested composite field.
///
/// Delegates to the fragment's own parse; an inner failure is propagated,
/// annotated with the outer field name.
pub fn mandatory_object<T>(
    object: &Map<String, Value>,
    field: &'static str,
    what: &'static str,
    sub: impl FnOnce(&Value) -> ParseResult<T>,
) -> ParseResult<T> {
    match object.get(field) {
        None => Err(ParseError::field(field, what, "field is missing")),
        Some(raw) => sub(raw).map_err(|inner| ParseError::nested(field, inner)),
    }
}

/// Extracts an optional nested composite field.
pub fn optional_object<T>(
    object: &Map<String, Value>,
    field: &'static str,
    sub: impl FnOnce(&Value) -> ParseResult<T>,
) -> ParseResult<Option<T>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => sub(raw)
            .map(Some)
            .map_err(|inner| ParseError::nested(field, inner)),
    }
}

/// Sub-parser: a JSON string, as owned text.
pub fn string(raw: &Value) -> Result<String, String> {
    raw.as_str()
        .map(str::to_owned)
        .ok_or_else(|| expected("string", raw))
}

/// Sub-parser: a JSON boolean.
pub fn boolean(raw: &Value) -> Result<bool, String> {
    raw.as_bool().ok_or_else(|| expected("boolean", raw))
}

/// Sub-parser: an RFC 3339 timestamp, normalized to UTC.
pub fn timestamp(raw: &Value) -> Result<DateTime<Utc>, String> {
    let text = raw.as_str().ok_or_else(|| expected("string", raw))?;
    DateTime::parse_from_rfc3339(text)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|error| format!("not a valid RFC 3339 timestamp: {error}"))
}

/// Sub-parser: a JSON string parsed through the target type's `FromStr`.
///
/// This is the bridge to the domain identifier parsers:
/// `fields::parsed::<ProviderId>` plugs a provider id grammar into any of
/// the combinators above.
pub fn parsed<T>(raw: &Value) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let text = raw.as_str().ok_or_else(|| expected("string", raw))?;
    text.parse::<T>().map_err(|error| error.to_string())
}

fn elements<T>(raw: &Value, sub: &impl Fn(&Value) -> Result<T, String>) -> Result<Vec<T>, String> {
    let array = raw.as_array().ok_or_else(|| expected("array", raw))?;
    let mut out = Vec::with_capacity(array.len());
    for (index, element) in array.iter().enumerate() {
        out.push(sub(element).map_err(|reason| format!("element {index}: {reason}"))?);
    }
    Ok(out)
}

fn expected(wanted: &str, raw: &Value) -> String {
    format!("expected a JSON {wanted}, found {}", json_type(raw))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
