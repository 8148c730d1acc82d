//! Path segments and path vectors.
//!
//! A [Segment] is one step of a node's address: either a string or an
//! integer. Segments double as child keys inside a tree, so the key a child
//! is stored under is the same value that appears in traversal vectors.

use std::fmt;

/// One segment of a path vector: a string or an integer key.
///
/// Derives `Eq + Hash + Ord`, so typed vectors can key hash maps directly
/// without a serialized encoding; `["1", "2"]` and `["1.2"]` can never alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// String key, e.g. a slug or a fixed-width path chunk.
    Str(String),
    /// Integer key, e.g. a sequence number.
    Int(i64),
}

impl Segment {
    /// Returns the string form if this is a string segment, else `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Segment::Str(s) => Some(s),
            Segment::Int(_) => None,
        }
    }

    /// Returns the integer value if this is an integer segment, else `None`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Segment::Str(_) => None,
            Segment::Int(i) => Some(*i),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Segment::Str(s) => write!(f, "{s}"),
            Segment::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Str(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Str(value)
    }
}

impl From<i64> for Segment {
    fn from(value: i64) -> Self {
        Segment::Int(value)
    }
}

/// Ordered sequence of segments addressing a node from the root.
///
/// The empty vector addresses the root itself.
pub type PathVector = Vec<Segment>;

/// Renders a vector in dotted form for error messages and logs.
///
/// The empty vector renders as `(root)` so messages stay readable.
pub fn format_vector(vector: &[Segment]) -> String {
    if vector.is_empty() {
        return "(root)".to_string();
    }
    let parts: Vec<String> = vector.iter().map(|s| s.to_string()).collect();
    parts.join(".")
}
