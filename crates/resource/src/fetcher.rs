use folio_traits::{BoxFuture, ContentFetcher, ResourceError, ResourceProvider, SharedResourceData};
use std::sync::Arc;

/// Serves fetches from a synchronous [`ResourceProvider`].
#[derive(Debug, Clone)]
pub struct ProviderFetcher {
    provider: Arc<dyn ResourceProvider>,
}

impl ProviderFetcher {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn ResourceProvider> {
        &self.provider
    }
}

impl ContentFetcher for ProviderFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<SharedResourceData, ResourceError>> {
        Box::pin(async move { self.provider.load(url) })
    }

    fn name(&self) -> &'static str {
        self.provider.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_traits::InMemoryResourceProvider;

    #[tokio::test]
    async fn test_fetch_delegates_to_provider() {
        let provider = InMemoryResourceProvider::new();
        provider.add_text("https://host/a.json", "{}").unwrap();
        let fetcher = ProviderFetcher::new(Arc::new(provider));

        assert_eq!(&*fetcher.fetch("https://host/a.json").await.unwrap(), b"{}");
        assert!(fetcher.fetch("https://host/b.json").await.is_err());
        assert_eq!(fetcher.name(), "InMemoryResourceProvider");
    }
}
