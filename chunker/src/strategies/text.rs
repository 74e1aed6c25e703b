use tracing::warn;

use crate::DocumentSplitter;

/// Fixed-size character windows with overlap, preferring to break at
/// whitespace so words stay intact.
pub struct SlidingWindowSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SlidingWindowSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let (chunk_size, chunk_overlap) = if chunk_size == 0 || chunk_overlap >= chunk_size {
            warn!(
                chunk_size,
                chunk_overlap, "invalid window settings, falling back to defaults"
            );
            (1000, 200)
        } else {
            (chunk_size, chunk_overlap)
        };
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Largest index `<= at` that lands on a char boundary.
    fn floor_boundary(content: &str, mut at: usize) -> usize {
        while at > 0 && !content.is_char_boundary(at) {
            at -= 1;
        }
        at
    }

    /// Last whitespace inside the window, if one exists past its midpoint.
    fn break_point(window: &str) -> Option<usize> {
        window
            .rfind(char::is_whitespace)
            .filter(|&pos| pos > window.len() / 2)
    }
}

impl DocumentSplitter for SlidingWindowSplitter {
    fn split(&self, content: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let len = content.len();
        let mut start = 0;

        while start < len {
            let mut end = Self::floor_boundary(content, (start + self.chunk_size).min(len));
            if end < len {
                if let Some(pos) = Self::break_point(&content[start..end]) {
                    end = start + pos + 1;
                }
            }

            let chunk = &content[start..end];
            if !chunk.trim().is_empty() {
                chunks.push(chunk.to_string());
            }

            if end == len {
                break;
            }
            let mut next = Self::floor_boundary(content, end.saturating_sub(self.chunk_overlap));
            // overlap must never stall the window
            if next <= start {
                next = end;
            }
            start = next;
        }

        chunks
    }
}

/// Blank-line separated paragraphs, flushed early once a paragraph grows
/// past the chunk size.
pub struct ParagraphSplitter {
    max_chunk_size: usize,
}

impl ParagraphSplitter {
    pub fn new(max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size: max_chunk_size.max(1),
        }
    }
}

impl DocumentSplitter for ParagraphSplitter {
    fn split(&self, content: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for line in content.lines() {
            // empty line indicates a paragraph break
            if line.trim().is_empty() {
                if !current.trim().is_empty() {
                    chunks.push(current.trim_end().to_string());
                }
                current.clear();
                continue;
            }

            current.push_str(line);
            current.push('\n');

            if current.len() > self.max_chunk_size {
                chunks.push(current.trim_end().to_string());
                current.clear();
            }
        }

        if !current.trim().is_empty() {
            chunks.push(current.trim_end().to_string());
        }

        chunks
    }
}
