use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cursor::CursorValue;

/// One listable unit from an external system: an object key with its
/// last-modified time, a table row with its cursor column value, a URL.
///
/// Lives only for the duration of one stream pass. Within a listing the
/// ordering must be stable, and for incremental streams ascending by
/// `cursor_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    /// Stable, human-diagnosable source locator (`bucket/key`,
    /// `schema.table`, URL). Becomes `origin_entity` on emitted records.
    pub entity: String,
    pub cursor_value: CursorValue,
    /// Flat metadata carried into record metadata (`updated_at`,
    /// `mime_type`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl SourceItem {
    pub fn new(entity: impl Into<String>, cursor_value: impl Into<CursorValue>) -> Self {
        Self {
            entity: entity.into(),
            cursor_value: cursor_value.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A bounded piece of extracted text, produced and consumed within one
/// item's processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    pub content: String,
    /// Position of this chunk within its source item, starting at 0.
    pub ordinal: usize,
}

impl DocumentChunk {
    pub fn new(content: impl Into<String>, ordinal: usize) -> Self {
        Self {
            content: content.into(),
            ordinal,
        }
    }
}
