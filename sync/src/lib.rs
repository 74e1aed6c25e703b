//! The incremental extraction and checkpointing protocol.
//!
//! A [`SyncCoordinator`] runs one [`StreamRunner`] per configured stream,
//! in catalog order. Each runner lists candidate items through its
//! extractor provider, filters against the stream's cursor watermark,
//! splits fetched content into chunks, and emits RECORD messages followed
//! by a STATE checkpoint per item. The merged output is a pull-driven
//! lazy sequence: the caller persists each STATE message before pulling
//! further, which is the whole resume story — a sync restarted from a
//! persisted cursor never re-emits an already-delivered item.

pub mod coordinator;
pub mod cursor;
pub mod emitter;
pub mod error;
pub mod runner;

use std::pin::Pin;

use futures::Stream;

use docstream_models::Message;

pub use coordinator::{SyncCoordinator, SyncOutcome, SyncRun, SyncStatus};
pub use cursor::CursorTracker;
pub use emitter::RecordEmitter;
pub use error::SyncError;
pub use runner::StreamRunner;

/// Merged output channel of a sync: one message at a time, on demand.
pub type MessageStream = Pin<Box<dyn Stream<Item = Message> + Send>>;

/// Consecutive per-item failures tolerated before a stream is failed
/// outright, to avoid silently dropping large ranges.
pub const DEFAULT_FAILURE_BUDGET: usize = 5;
