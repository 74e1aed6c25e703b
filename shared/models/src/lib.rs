pub mod catalog;
pub mod cursor;
pub mod item;
pub mod messages;

pub use catalog::{
    Catalog, FieldType, ProviderKind, SplitterConfig, SplitterStrategy, StreamDefinition,
    SyncMode, WriteMode, DEFAULT_CURSOR_FIELD,
};
pub use cursor::CursorValue;
pub use item::{DocumentChunk, SourceItem};
pub use messages::{
    LogLevel, LogMessage, Message, MessageType, RecordData, RecordMessage, RecordMetadata,
    StateMessage, StreamState, RECORD_ID_NOT_SET,
};
