use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use docstream_models::ProviderKind;

use super::local_file::LocalFileProvider;
use super::traits::ExtractorProvider;
use super::url_scraper::UrlScraperProvider;

/// Maps a stream's provider tag to a live extractor instance.
///
/// The coordinator resolves each configured stream against this at
/// construction time; binding an arbitrary implementation under any tag
/// is also how tests inject in-memory fakes.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn ExtractorProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in providers bound under their own tags.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ProviderKind::LocalFile, Arc::new(LocalFileProvider::new()));
        registry.register(
            ProviderKind::UrlScraper,
            Arc::new(UrlScraperProvider::new()),
        );
        info!("Registered {} default providers", registry.providers.len());
        registry
    }

    pub fn register(&mut self, kind: ProviderKind, provider: Arc<dyn ExtractorProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn ExtractorProvider>> {
        self.providers.get(&kind).cloned()
    }

    pub fn available(&self) -> Vec<ProviderKind> {
        self.providers.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_kinds() {
        let registry = ProviderRegistry::with_defaults();
        assert!(registry.get(ProviderKind::LocalFile).is_some());
        assert!(registry.get(ProviderKind::UrlScraper).is_some());
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = ProviderRegistry::new();
        assert!(registry.get(ProviderKind::LocalFile).is_none());
        assert!(registry.available().is_empty());
    }
}
