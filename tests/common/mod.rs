pub mod fixtures;

use folio::{ManualBuilder, ManualEvent, ManualStore};
use folio_resource::{InMemoryResourceProvider, ProviderFetcher};
use folio_traits::{BoxFuture, ContentFetcher, ResourceError, ResourceProvider, SharedResourceData};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn provider() -> Arc<InMemoryResourceProvider> {
    let provider = InMemoryResourceProvider::new();
    for (url, text) in fixtures::repository_files() {
        provider
            .add_text(url, &text)
            .expect("fixture files are added to a fresh provider");
    }
    Arc::new(provider)
}

/// A store over the fixture repository. Call inside a tokio runtime so the
/// link workers start.
pub fn store() -> Arc<ManualStore> {
    init_logging();
    ManualBuilder::new()
        .with_provider(provider())
        .build()
        .expect("default configuration is valid")
}

/// Waits for the first event matching `predicate`.
pub async fn wait_for_event<F>(store: &ManualStore, mut predicate: F) -> Option<ManualEvent>
where
    F: FnMut(&ManualEvent) -> bool,
{
    let events = store.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        while let Ok(event) = events.recv().await {
            if predicate(&event) {
                return Some(event);
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}

/// Holds fetches of URLs ending in `suffix` until the test opens the gate.
#[derive(Debug)]
pub struct GatedFetcher {
    inner: ProviderFetcher,
    suffix: &'static str,
    pub reached: Arc<Notify>,
    pub gate: Arc<Semaphore>,
}

impl GatedFetcher {
    pub fn new(provider: Arc<dyn ResourceProvider>, suffix: &'static str) -> Self {
        Self {
            inner: ProviderFetcher::new(provider),
            suffix,
            reached: Arc::new(Notify::new()),
            gate: Arc::new(Semaphore::new(0)),
        }
    }
}

impl ContentFetcher for GatedFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<SharedResourceData, ResourceError>> {
        Box::pin(async move {
            if url.ends_with(self.suffix) {
                self.reached.notify_one();
                let _permit = self.gate.acquire().await;
            }
            self.inner.fetch(url).await
        })
    }

    fn name(&self) -> &'static str {
        "GatedFetcher"
    }
}
