//! Field Path Addressing
//!
//! This module defines `FieldPath`, the dot-delimited address used throughout
//! FormSpace to locate a value inside a form document and the schema node
//! governing it.
//!
//! # Path Syntax
//!
//! - Property names are separated by `.` (e.g., `"customer.address.city"`)
//! - Array indices are ordinary segments (e.g., `"contacts.0.email"`)
//! - The empty path denotes the document root (the whole document)
//!
//! # Examples
//!
//! ```rust
//! use formspace_core::models::FieldPath;
//!
//! let path = FieldPath::from_dotted("customer.address.city");
//! assert_eq!(path.segments().len(), 3);
//! assert!(!path.is_root());
//!
//! let root = FieldPath::root();
//! assert!(root.is_root());
//! assert_eq!(root.to_dotted(), "");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Dot-delimited sequence of property names locating a value inside a form
/// document and the corresponding schema node.
///
/// An empty segment list denotes the document root ("whole document").
/// Paths serialize as dotted strings (`""` for root) so they can travel
/// inside form events and validation reports unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The root path, denoting the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path string. An empty string yields the root path.
    pub fn from_dotted(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    /// Parse an optional dotted path. `None` denotes the document root.
    pub fn parse(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::from_dotted(p),
            None => Self::root(),
        }
    }

    /// Build a path from pre-split segments.
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// True if this path denotes the whole document.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path's segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The dotted string form of this path (`""` for root).
    pub fn to_dotted(&self) -> String {
        self.segments.join(".")
    }

    /// Resolve this path inside a document, returning the value it points at.
    ///
    /// Objects are indexed by property name; arrays by numeric segment.
    /// Returns `None` when any segment does not exist - a missing value is
    /// distinct from a committed `null`.
    pub fn resolve_in<'v>(&self, document: &'v Value) -> Option<&'v Value> {
        let mut current = document;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => {
                    let index: usize = segment.parse().ok()?;
                    items.get(index)?
                }
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dotted())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_dotted())
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(FieldPath::parse(raw.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_path() {
        let root = FieldPath::root();
        assert!(root.is_root());
        assert_eq!(root.segments().len(), 0);
        assert_eq!(root.to_dotted(), "");
    }

    #[test]
    fn test_from_dotted() {
        let path = FieldPath::from_dotted("a.b.c");
        assert_eq!(path.segments(), &["a", "b", "c"]);
        assert_eq!(path.to_dotted(), "a.b.c");
    }

    #[test]
    fn test_empty_string_is_root() {
        assert!(FieldPath::from_dotted("").is_root());
        assert!(FieldPath::parse(None).is_root());
        assert!(!FieldPath::parse(Some("a")).is_root());
    }

    #[test]
    fn test_resolve_in_objects() {
        let doc = json!({"customer": {"address": {"city": "Lisbon"}}});
        let path = FieldPath::from_dotted("customer.address.city");
        assert_eq!(path.resolve_in(&doc), Some(&json!("Lisbon")));
    }

    #[test]
    fn test_resolve_in_arrays() {
        let doc = json!({"contacts": [{"email": "a@b.c"}, {"email": "d@e.f"}]});
        let path = FieldPath::from_dotted("contacts.1.email");
        assert_eq!(path.resolve_in(&doc), Some(&json!("d@e.f")));
    }

    #[test]
    fn test_resolve_in_missing() {
        let doc = json!({"a": 1});
        assert_eq!(FieldPath::from_dotted("b").resolve_in(&doc), None);
        assert_eq!(FieldPath::from_dotted("a.b").resolve_in(&doc), None);
        assert_eq!(FieldPath::from_dotted("contacts.9").resolve_in(&doc), None);
    }

    #[test]
    fn test_resolve_root_returns_document() {
        let doc = json!({"a": 1});
        assert_eq!(FieldPath::root().resolve_in(&doc), Some(&doc));
    }

    #[test]
    fn test_serialization_round_trip() {
        let path = FieldPath::from_dotted("a.b");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"a.b\"");

        let back: FieldPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);

        // null deserializes to the root path
        let root: FieldPath = serde_json::from_str("null").unwrap();
        assert!(root.is_root());
    }
}
