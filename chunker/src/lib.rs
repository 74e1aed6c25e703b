//! Document splitting for the sync pipeline.
//!
//! A splitter turns the raw text of one source item into a finite
//! sequence of chunks. Strategies are selected per stream via
//! [`SplitterConfig`]; splitting is pure and never fails on valid UTF-8.

pub mod strategies;

use docstream_models::{SplitterConfig, SplitterStrategy};

pub use strategies::{IdentitySplitter, ParagraphSplitter, SlidingWindowSplitter};

/// Splits raw document content into bounded text chunks.
///
/// Empty input always yields zero chunks.
pub trait DocumentSplitter: Send + Sync {
    fn split(&self, content: &str) -> Vec<String>;
}

/// Builds the splitter for a stream's configured strategy.
pub fn splitter_for(config: &SplitterConfig) -> Box<dyn DocumentSplitter> {
    match config.strategy {
        SplitterStrategy::Identity => Box::new(IdentitySplitter),
        SplitterStrategy::SlidingWindow => Box::new(SlidingWindowSplitter::new(
            config.chunk_size,
            config.chunk_overlap,
        )),
        SplitterStrategy::Paragraph => Box::new(ParagraphSplitter::new(config.chunk_size)),
    }
}
