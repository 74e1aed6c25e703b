use crate::DocumentSplitter;

/// Passes the whole document through as a single chunk.
pub struct IdentitySplitter;

impl DocumentSplitter for IdentitySplitter {
    fn split(&self, content: &str) -> Vec<String> {
        if content.is_empty() {
            Vec::new()
        } else {
            vec![content.to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_chunk_per_document() {
        let chunks = IdentitySplitter.split("a\n\nb");
        assert_eq!(chunks, vec!["a\n\nb"]);
    }

    #[test]
    fn empty_document_has_no_chunks() {
        assert!(IdentitySplitter.split("").is_empty());
    }
}
