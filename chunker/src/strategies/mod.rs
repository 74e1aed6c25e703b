mod identity;
mod text;

pub use identity::IdentitySplitter;
pub use text::{ParagraphSplitter, SlidingWindowSplitter};
