//! Extractor providers: the pluggable listing/fetching side of a sync.
//!
//! A provider knows how to enumerate source items for a scope and fetch
//! one item's raw content. Everything protocol-level (cursors,
//! checkpoints, message emission) lives in `docstream-sync`; the one
//! contract imposed here is that listings are stably ordered.

pub mod error;
pub mod local_file;
pub mod registry;
pub mod traits;
pub mod url_scraper;

pub use error::ExtractorError;
pub use local_file::LocalFileProvider;
pub use registry::ProviderRegistry;
pub use traits::ExtractorProvider;
pub use url_scraper::UrlScraperProvider;
