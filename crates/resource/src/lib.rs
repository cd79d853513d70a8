//! Resource access for the manual viewer.
//!
//! - [`FilesystemResourceProvider`]: a local checkout of the content repository
//! - [`ProviderFetcher`]: adapts any synchronous provider to the async fetch seam
//! - [`MemoizingCache`]: the shared URL-keyed fetch cache
//!
//! The in-memory provider from `folio-traits` is re-exported for convenience.

mod cache;
mod fetcher;
mod filesystem;

pub use cache::MemoizingCache;
pub use fetcher::ProviderFetcher;
pub use filesystem::FilesystemResourceProvider;

pub use folio_traits::InMemoryResourceProvider;
