//! Path-based addressing into nested records.
//!
//! A [`FieldPath`] locates a value inside structured data by walking a
//! sequence of segments: named fields, sequence indices, and positional
//! "skip" placeholders.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Represents a path to a field in structured data
///
/// # Examples
///
/// - `user.name` - Nested field access
/// - `items.[0]` - First element of a sequence
/// - `powers.secondary.[_].[0]` - Skip one element, then take the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    /// The raw path string
    pub raw: String,
    /// Parsed path segments
    pub segments: Vec<PathSegment>,
}

/// A segment in a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field (e.g., "user", "name")
    Key(String),
    /// A sequence index (e.g., [0], [5])
    Index(usize),
    /// A positional placeholder that consumes one sequence element
    /// without binding it (e.g., [_])
    Skip,
}

impl FieldPath {
    /// Parse a field path with a given delimiter
    ///
    /// Segments of the form `[N]` are sequence indices, `[_]` is a skip
    /// placeholder, and everything else is a field name.
    ///
    /// # Example
    ///
    /// ```
    /// use pluck::{FieldPath, PathSegment};
    ///
    /// let path = FieldPath::parse("user.address.city", ".");
    /// assert_eq!(path.segments.len(), 3);
    ///
    /// let path = FieldPath::parse("powers.secondary.[_].[0]", ".");
    /// assert_eq!(path.segments[2], PathSegment::Skip);
    /// assert_eq!(path.segments[3], PathSegment::Index(0));
    /// ```
    pub fn parse(path: &str, delimiter: &str) -> Self {
        let segments = path
            .split(delimiter)
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s == "[_]" {
                    return PathSegment::Skip;
                }

                // Check if it's a sequence index
                if s.starts_with('[') && s.ends_with(']') {
                    if let Ok(index) = s[1..s.len() - 1].parse::<usize>() {
                        return PathSegment::Index(index);
                    }
                }

                // Otherwise it's a field name
                PathSegment::Key(s.to_string())
            })
            .collect();

        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// Create a field path from a dotted string (common format)
    pub fn from_dotted(path: &str) -> Self {
        Self::parse(path, ".")
    }

    /// Create a field path from pre-built segments.
    ///
    /// The raw form is rendered in dotted notation.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        let raw = segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".");

        Self { raw, segments }
    }

    /// The name of the final `Key` segment, if the path ends on one.
    ///
    /// Used to infer a target name for a binding without an explicit alias.
    pub fn last_key(&self) -> Option<&str> {
        match self.segments.last() {
            Some(PathSegment::Key(name)) => Some(name),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(i) => write!(f, "[{}]", i),
            PathSegment::Skip => write!(f, "[_]"),
        }
    }
}

// Paths serialize as their dotted string form so specs stay readable
// in YAML and JSON.
impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Err(D::Error::custom("field path must not be empty"));
        }
        Ok(FieldPath::from_dotted(&raw))
    }
}
