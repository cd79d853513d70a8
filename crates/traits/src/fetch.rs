//! Asynchronous fetching and request de-duplication.

use crate::resource::{ResourceError, SharedResourceData};
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

/// An owned, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Retrieves the bytes behind a URL.
pub trait ContentFetcher: Send + Sync + Debug {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<SharedResourceData, ResourceError>>;

    fn name(&self) -> &'static str;
}

/// A fetch cache. Concurrent requests for one URL must share a single fetch,
/// and later requests must observe the first result.
pub trait ContentCache: Send + Sync + Debug {
    fn get_or_fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<SharedResourceData, ResourceError>>;

    /// Forgets every cached result.
    fn clear(&self);
}
