// src/builder.rs
use crate::config::ManualConfig;
use crate::links::spawn_link_workers;
use crate::store::ManualStore;
use folio_core::ManualError;
use folio_layout::PageGeometry;
use folio_resource::{FilesystemResourceProvider, MemoizingCache, ProviderFetcher};
use folio_traits::{ContentCache, ContentFetcher, ResourceProvider};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A builder for creating a [`ManualStore`].
#[derive(Default)]
pub struct ManualBuilder {
    config: ManualConfig,
    fetcher: Option<Arc<dyn ContentFetcher>>,
    cache: Option<Arc<dyn ContentCache>>,
}

impl ManualBuilder {
    /// Creates a new `ManualBuilder` with default settings.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: ManualConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads settings from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ManualError> {
        self.config = ManualConfig::from_file(path)?;
        Ok(self)
    }

    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.config.repository_url = url.into();
        self
    }

    /// Serves repository URLs from a local checkout.
    pub fn with_local_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.config.local_root = Some(root.into());
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.config.geometry = geometry;
        self
    }

    pub fn with_link_workers(mut self, workers: usize) -> Self {
        self.config.link_workers = workers;
        self
    }

    /// Fetches through `provider` instead of the configured source.
    pub fn with_provider(self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.with_fetcher(Arc::new(ProviderFetcher::new(provider)))
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn ContentFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Replaces the default memoizing cache.
    pub fn with_cache(mut self, cache: Arc<dyn ContentCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Consumes the builder and creates the store.
    ///
    /// Link workers are spawned on the current tokio runtime. Without one,
    /// linked entries load only when opened.
    pub fn build(self) -> Result<Arc<ManualStore>, ManualError> {
        self.config.validate()?;
        let cache = match self.cache {
            Some(cache) => cache,
            None => {
                let fetcher = match self.fetcher {
                    Some(fetcher) => fetcher,
                    None => default_fetcher(&self.config)?,
                };
                log::info!("Fetching manual content via {}", fetcher.name());
                Arc::new(MemoizingCache::new(fetcher)) as Arc<dyn ContentCache>
            }
        };

        let workers = self.config.link_workers;
        let (store, link_rx) = ManualStore::new(self.config, cache);
        let store = Arc::new(store);
        if tokio::runtime::Handle::try_current().is_ok() {
            spawn_link_workers(&store, link_rx, workers);
        } else {
            log::warn!("No tokio runtime; linked entries will not load in the background.");
        }
        Ok(store)
    }
}

fn default_fetcher(config: &ManualConfig) -> Result<Arc<dyn ContentFetcher>, ManualError> {
    if let Some(root) = &config.local_root {
        if !root.is_dir() {
            return Err(ManualError::Config(format!(
                "Local repository '{}' is not a directory",
                root.display()
            )));
        }
        let provider = FilesystemResourceProvider::new(root)
            .with_url_prefix(config.repository_url.trim_end_matches('/'));
        return Ok(Arc::new(ProviderFetcher::new(Arc::new(provider))));
    }
    remote_fetcher()
}

#[cfg(feature = "remote")]
fn remote_fetcher() -> Result<Arc<dyn ContentFetcher>, ManualError> {
    Ok(Arc::new(crate::http::HttpFetcher::new()))
}

#[cfg(not(feature = "remote"))]
fn remote_fetcher() -> Result<Arc<dyn ContentFetcher>, ManualError> {
    Err(ManualError::Config(
        "No local_root configured and the `remote` feature is disabled".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_traits::InMemoryResourceProvider;

    #[test]
    fn test_build_without_runtime() {
        let store = ManualBuilder::new()
            .with_provider(Arc::new(InMemoryResourceProvider::new()))
            .build()
            .unwrap();
        assert_eq!(store.generation(), 0);
        assert_eq!(store.config().link_workers, 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = ManualBuilder::new()
            .with_provider(Arc::new(InMemoryResourceProvider::new()))
            .with_link_workers(0)
            .build();
        assert!(matches!(result, Err(ManualError::Config(_))));
    }

    #[test]
    fn test_missing_local_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = ManualBuilder::new()
            .with_local_root(dir.path().join("nope"))
            .build();
        assert!(matches!(result, Err(ManualError::Config(_))));
    }
}
