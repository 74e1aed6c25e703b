use std::path::Path;
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use mime_guess::from_path;
use tokio::fs;
use tracing::{info, warn};
use walkdir::WalkDir;

use docstream_models::SourceItem;

use super::error::ExtractorError;
use super::traits::ExtractorProvider;

/// Walks directories on the local filesystem; one item per regular
/// file, cursor = last-modified time in epoch seconds.
pub struct LocalFileProvider {
    follow_links: bool,
}

impl LocalFileProvider {
    pub fn new() -> Self {
        Self { follow_links: true }
    }

    fn item_for(path: &Path) -> Option<SourceItem> {
        let metadata = match path.metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable file");
                return None;
            }
        };
        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        let mut item = SourceItem::new(path.to_string_lossy(), modified)
            .with_extra("size", metadata.len().to_string());
        if let Some(mime) = from_path(path).first() {
            item = item.with_extra("mime_type", mime.to_string());
        }
        Some(item)
    }
}

impl Default for LocalFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractorProvider for LocalFileProvider {
    fn name(&self) -> &str {
        "local_file"
    }

    async fn check_connection(&self) -> Result<(), ExtractorError> {
        // the local filesystem is always reachable
        Ok(())
    }

    async fn list(&self, scope: &[String]) -> Result<Vec<SourceItem>, ExtractorError> {
        let mut items = Vec::new();

        for root in scope {
            // a missing root is a scope problem, not an empty listing
            fs::metadata(root)
                .await
                .map_err(|e| ExtractorError::Unavailable(format!("{}: {}", root, e)))?;

            for entry in WalkDir::new(root)
                .follow_links(self.follow_links)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some(item) = Self::item_for(entry.path()) {
                    items.push(item);
                }
            }
        }

        // stable total order: cursor first, path as tie-breaker
        items.sort_by(|a, b| {
            a.cursor_value
                .cmp(&b.cursor_value)
                .then_with(|| a.entity.cmp(&b.entity))
        });
        info!(count = items.len(), "listed local files");
        Ok(items)
    }

    async fn fetch(&self, item: &SourceItem) -> Result<String, ExtractorError> {
        let bytes = fs::read(&item.entity)
            .await
            .map_err(|e| ExtractorError::NotFound(format!("{}: {}", item.entity, e)))?;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut f = std::fs::File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn lists_files_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.txt", "alpha");
        write_file(dir.path(), "b.md", "beta");

        let provider = LocalFileProvider::new();
        let scope = vec![dir.path().to_string_lossy().to_string()];
        let items = provider.list(&scope).await.unwrap();

        assert_eq!(items.len(), 2);
        let a = items.iter().find(|i| i.entity.ends_with("a.txt")).unwrap();
        assert_eq!(a.extra.get("size").unwrap(), "5");
        assert_eq!(a.extra.get("mime_type").unwrap(), "text/plain");
    }

    #[tokio::test]
    async fn listing_is_sorted_by_cursor_then_entity() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            write_file(dir.path(), name, "x");
        }

        let provider = LocalFileProvider::new();
        let scope = vec![dir.path().to_string_lossy().to_string()];
        let items = provider.list(&scope).await.unwrap();

        let mut sorted = items.clone();
        sorted.sort_by(|a, b| {
            a.cursor_value
                .cmp(&b.cursor_value)
                .then_with(|| a.entity.cmp(&b.entity))
        });
        assert_eq!(items, sorted);
    }

    #[tokio::test]
    async fn missing_root_is_unavailable() {
        let provider = LocalFileProvider::new();
        let err = provider
            .list(&["/nonexistent/docstream-test".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractorError::Unavailable(_)));
    }

    #[tokio::test]
    async fn fetch_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "doc.txt", "document body");

        let provider = LocalFileProvider::new();
        let scope = vec![dir.path().to_string_lossy().to_string()];
        let items = provider.list(&scope).await.unwrap();
        let content = provider.fetch(&items[0]).await.unwrap();
        assert_eq!(content, "document body");
    }
}
