pub mod fetch;
pub mod links;
pub mod localize;
pub mod resource;

pub use fetch::{BoxFuture, ContentCache, ContentFetcher};
pub use links::{LinkSink, NoopLinkSink};
pub use localize::{IdentityTranslator, Translate};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
