use async_trait::async_trait;

use docstream_models::SourceItem;

use super::error::ExtractorError;

/// Capability a stream is wired to at construction time: list candidate
/// source items for a scope, fetch one item's raw text.
///
/// Contract imposed by the sync protocol: `list` must return a stable
/// total order — repeated calls against an unchanged source yield the
/// same items in the same order. The runner re-sorts by cursor value, so
/// providers only need stability, not sortedness. Credential handling
/// and retries are the provider's own concern.
#[async_trait]
pub trait ExtractorProvider: Send + Sync {
    /// Short diagnostic name for logs.
    fn name(&self) -> &str;

    /// Verifies the source is reachable with the configured credentials.
    /// Called once before a stream starts listing.
    async fn check_connection(&self) -> Result<(), ExtractorError>;

    /// Enumerates all candidate items under the given scope entries
    /// (directory prefixes, table names, URLs).
    async fn list(&self, scope: &[String]) -> Result<Vec<SourceItem>, ExtractorError>;

    /// Retrieves one item's content as text. Any transient local
    /// materialization (temp files, buffers) is released before this
    /// returns or when the returned value drops.
    async fn fetch(&self, item: &SourceItem) -> Result<String, ExtractorError>;
}
