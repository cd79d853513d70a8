//! URL-keyed fetch memoization.

use folio_traits::{BoxFuture, ContentCache, ContentFetcher, ResourceError, SharedResourceData};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<Result<SharedResourceData, ResourceError>>>;

/// Memoizes fetch results per URL for the life of the cache.
///
/// Concurrent requests for one URL share a single fetch. Failures are cached
/// too, so a missing file is asked for once.
#[derive(Debug)]
pub struct MemoizingCache {
    fetcher: Arc<dyn ContentFetcher>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl MemoizingCache {
    pub fn new(fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self {
            fetcher,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, url: &str) -> Result<Slot, ResourceError> {
        let mut slots = self.slots.lock().map_err(|_| ResourceError::LoadFailed {
            path: url.to_string(),
            message: "fetch cache lock poisoned".to_string(),
        })?;
        Ok(slots.entry(url.to_string()).or_default().clone())
    }

    /// Number of URLs requested since the last clear.
    pub fn len(&self) -> usize {
        self.slots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentCache for MemoizingCache {
    fn get_or_fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<SharedResourceData, ResourceError>> {
        Box::pin(async move {
            let slot = self.slot(url)?;
            slot.get_or_init(|| async {
                log::debug!("fetching {} via {}", url, self.fetcher.name());
                self.fetcher.fetch(url).await
            })
            .await
            .clone()
        })
    }

    fn clear(&self) {
        if let Ok(mut slots) = self.slots.lock() {
            log::debug!("clearing {} cached fetches", slots.len());
            slots.clear();
        }
    }
}
