//! Opaque pagination cursor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which boundary marker a cursor was read from. Only bottom cursors
/// (the resume point for the next, older page) are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorKind {
    Bottom,
}

/// Resume point for the next page of a paginated resource.
///
/// The token is normalized on construction by percent-encoding the `|`
/// separator that follower/following cursors contain, so a cursor handed to
/// a caller can be pasted into a query string as-is and two cursors compare
/// equal regardless of which form they were built from. Cursors are never
/// ordered or mutated, only passed back on the next request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Cursor {
    value: String,
    kind: CursorKind,
}

impl Cursor {
    /// Builds a bottom cursor from a raw or already-normalized token.
    pub fn new(raw: &str) -> Self {
        Cursor {
            value: raw.replace('|', "%7C"),
            kind: CursorKind::Bottom,
        }
    }

    /// The normalized token.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> CursorKind {
        self.kind
    }

    /// The token as the upstream API issued it, for embedding into request
    /// variables that are percent-encoded as a whole.
    pub fn decoded(&self) -> String {
        self.value.replace("%7C", "|")
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<String> for Cursor {
    fn from(raw: String) -> Self {
        Cursor::new(&raw)
    }
}

impl From<&str> for Cursor {
    fn from(raw: &str) -> Self {
        Cursor::new(raw)
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_is_percent_encoded() {
        let cursor = Cursor::new("1767603722871144445|1767603722871144440");
        assert_eq!(cursor.as_str(), "1767603722871144445%7C1767603722871144440");
        assert_eq!(cursor.decoded(), "1767603722871144445|1767603722871144440");
        assert_eq!(cursor.kind(), CursorKind::Bottom);
    }

    #[test]
    fn test_raw_and_encoded_forms_are_equal() {
        assert_eq!(Cursor::new("a|b"), Cursor::new("a%7Cb"));
        assert_eq!(Cursor::new("DAABCgABF"), Cursor::from("DAABCgABF".to_string()));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Cursor::new("x|y")).unwrap();
        assert_eq!(json, "\"x%7Cy\"");
        let back: Cursor = serde_json::from_str("\"x|y\"").unwrap();
        assert_eq!(back, Cursor::new("x%7Cy"));
    }
}
