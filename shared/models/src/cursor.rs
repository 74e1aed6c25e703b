use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Opaque, totally-ordered watermark value scoped to one namespace.
///
/// Timestamps are carried as epoch-second integers; lexical cursors
/// (object keys, URLs) as text. Cross-variant comparisons put integers
/// before text so a mixed listing still sorts deterministically instead
/// of panicking mid-sync.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CursorValue {
    Int(i64),
    Text(String),
}

impl Ord for CursorValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CursorValue::Int(a), CursorValue::Int(b)) => a.cmp(b),
            (CursorValue::Text(a), CursorValue::Text(b)) => a.cmp(b),
            (CursorValue::Int(_), CursorValue::Text(_)) => Ordering::Less,
            (CursorValue::Text(_), CursorValue::Int(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for CursorValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CursorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorValue::Int(v) => write!(f, "{}", v),
            CursorValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for CursorValue {
    fn from(v: i64) -> Self {
        CursorValue::Int(v)
    }
}

impl From<&str> for CursorValue {
    fn from(v: &str) -> Self {
        CursorValue::Text(v.to_string())
    }
}

impl From<String> for CursorValue {
    fn from(v: String) -> Self {
        CursorValue::Text(v)
    }
}
