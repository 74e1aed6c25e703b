use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cursor::CursorValue;

/// Sentinel record id for streams without upsert keys. Such records
/// cannot be deduplicated downstream and rely on append semantics.
pub const RECORD_ID_NOT_SET: &str = "not_set";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Record,
    State,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One message on the sync output channel. Exactly one of `record`,
/// `state`, `log` is populated, matching `message_type`; this is the
/// boundary contract an ingestion pipeline parses, one JSON object per
/// line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<StateMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogMessage>,
}

impl Message {
    pub fn record(record: RecordMessage) -> Self {
        Self {
            message_type: MessageType::Record,
            record: Some(record),
            state: None,
            log: None,
        }
    }

    pub fn state(state: StateMessage) -> Self {
        Self {
            message_type: MessageType::State,
            record: None,
            state: Some(state),
            log: None,
        }
    }

    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Log,
            record: None,
            state: None,
            log: Some(LogMessage {
                level,
                message: message.into(),
            }),
        }
    }

    /// Serializes as a single JSONL line, without the trailing newline.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMessage {
    pub namespace: String,
    pub data: RecordData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordData {
    pub document_chunk: String,
    pub metadata: RecordMetadata,
}

/// Provenance stamped on every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Exact source location the chunk came from (`bucket/key`,
    /// `schema.table`, URL).
    pub origin_entity: String,
    /// Epoch seconds at emission time.
    pub emitted_at: i64,
    /// Deterministic join of upsert-key values, or [`RECORD_ID_NOT_SET`].
    pub record_id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// Checkpoint for one namespace. A consumer that persists this may treat
/// everything up to and including the checkpointed item as delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    /// Namespace key the cursor is tracked under.
    pub stream: String,
    pub stream_state: StreamState,
}

impl StateMessage {
    pub fn single(
        namespace: impl Into<String>,
        cursor_field: impl Into<String>,
        value: CursorValue,
    ) -> Self {
        let mut data = BTreeMap::new();
        data.insert(cursor_field.into(), value);
        Self {
            stream: namespace.into(),
            stream_state: StreamState { data },
        }
    }

    /// The cursor value for `cursor_field`, if present.
    pub fn cursor(&self, cursor_field: &str) -> Option<&CursorValue> {
        self.stream_state.data.get(cursor_field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamState {
    pub data: BTreeMap<String, CursorValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}
