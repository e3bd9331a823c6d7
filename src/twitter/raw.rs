//! Safe accessors over the schema-less JSON returned by the Twitter web API.
//!
//! Every navigation step either returns an `Option` (for fields that may
//! legitimately be absent) or an [`Error::UnexpectedShape`] naming the JSON
//! pointer that was missing or had the wrong type. Nothing here indexes with
//! `value["key"]`, so a changed upstream schema surfaces as an error instead
//! of silently reading `Null`.

use chrono::{DateTime, Utc};
use log::debug;
use serde_json::Value;

use crate::error::{Error, Result};

/// Timestamp layout used by the legacy `created_at` fields,
/// e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Resolves a JSON pointer that must exist.
pub(crate) fn require<'a>(value: &'a Value, pointer: &str) -> Result<&'a Value> {
    value
        .pointer(pointer)
        .ok_or_else(|| Error::shape(format!("missing `{}`", pointer)))
}

/// Resolves a JSON pointer that must exist and hold an array.
pub(crate) fn require_array<'a>(value: &'a Value, pointer: &str) -> Result<&'a [Value]> {
    require(value, pointer)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::shape(format!("`{}` is not an array", pointer)))
}

/// Resolves a JSON pointer that must exist and hold a string.
pub(crate) fn require_str<'a>(value: &'a Value, pointer: &str) -> Result<&'a str> {
    require(value, pointer)?
        .as_str()
        .ok_or_else(|| Error::shape(format!("`{}` is not a string", pointer)))
}

/// Resolves the first pointer in `pointers` that exists, returning it along
/// with the node it points at.
///
/// Used where the upstream API has shipped the same node under more than one
/// name (for example `threaded_conversation_with_injections_v2`).
pub(crate) fn require_any<'a, 'p>(
    value: &'a Value,
    pointers: &[&'p str],
) -> Result<(&'p str, &'a Value)> {
    pointers
        .iter()
        .find_map(|pointer| value.pointer(pointer).map(|node| (*pointer, node)))
        .ok_or_else(|| Error::shape(format!("none of {:?} present", pointers)))
}

/// Returns true when a container node is absent, `null`, `{}` or `[]`.
///
/// The upstream API answers lookups of nonexistent users and tweets with an
/// empty container rather than an error, so this is the existence check.
pub(crate) fn is_json_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Optional string field.
pub(crate) fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Optional counter. Accepts JSON numbers and numeric strings
/// (view counts arrive as `"1234"`).
pub(crate) fn u64_at(value: &Value, pointer: &str) -> Option<u64> {
    match value.pointer(pointer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Optional boolean flag.
pub(crate) fn bool_at(value: &Value, pointer: &str) -> Option<bool> {
    value.pointer(pointer).and_then(Value::as_bool)
}

/// Optional legacy timestamp, converted to UTC.
pub(crate) fn date_at(value: &Value, pointer: &str) -> Option<DateTime<Utc>> {
    let raw = value.pointer(pointer).and_then(Value::as_str)?;
    match DateTime::parse_from_str(raw, TWITTER_DATE_FORMAT) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            debug!("Ignoring unparsable timestamp '{}' at {}: {}", raw, pointer, e);
            None
        }
    }
}
