use thiserror::Error;

use docstream_connectors::ExtractorError;
use docstream_models::CursorValue;

/// Failure taxonomy for one sync invocation.
///
/// Only `Configuration` aborts the whole sync, and only before any
/// extraction starts. Everything else is absorbed at the stream or item
/// boundary and surfaced as LOG messages on the output channel.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid configuration for stream '{stream}': {reason}")]
    Configuration { stream: String, reason: String },

    #[error("Provider unavailable for stream '{stream}': {source}")]
    ProviderUnavailable {
        stream: String,
        #[source]
        source: ExtractorError,
    },

    #[error("Failed to process item '{entity}': {source}")]
    ItemProcessing {
        entity: String,
        #[source]
        source: ExtractorError,
    },

    /// A provider handed back items out of cursor order. This invalidates
    /// the checkpoint guarantee, so it escalates like a provider failure.
    #[error("Ordering violation: cursor {got} regressed below watermark {watermark}")]
    OrderingViolation {
        got: CursorValue,
        watermark: CursorValue,
    },

    #[error("Exceeded failure budget: {count} consecutive item failures")]
    FailureBudgetExceeded { count: usize },
}
