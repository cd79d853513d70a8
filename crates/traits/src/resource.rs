//! Resource access for manual content.
//!
//! Every file the viewer reads (entry text, entry data, recipes, tags, icons,
//! category listings) is addressed by a URL-like path and returned as shared
//! bytes. The synchronous [`ResourceProvider`] covers sources that can answer
//! immediately; network sources go through [`crate::fetch::ContentFetcher`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Request for '{url}' returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ResourceError {
    /// True when the resource simply does not exist, as opposed to a transport failure.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            ResourceError::NotFound(_) | ResourceError::Status { status: 404, .. }
        )
    }
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// A source of manual resources that answers synchronously.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load a resource by its path or URL.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, path: &str) -> bool;

    /// Prefix under which this provider resolves relative paths, if any.
    fn base_path(&self) -> Option<&str> {
        None
    }

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Resources held in memory, keyed by their full URL.
///
/// Used by the browser front end, which pushes fetched files in, and by tests.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

fn poisoned(path: &str) -> ResourceError {
    ResourceError::LoadFailed {
        path: path.to_string(),
        message: "resource store lock poisoned".to_string(),
    }
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a provider pre-populated with UTF-8 text resources.
    pub fn from_text<I, K, V>(entries: I) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let provider = Self::new();
        for (path, text) in entries {
            provider.add(path, text.into().into_bytes())?;
        }
        Ok(provider)
    }

    /// Stores `data` under `path`, replacing any previous value.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        self.add_shared(path, Arc::new(data))
    }

    pub fn add_text(&self, path: impl Into<String>, text: &str) -> Result<(), ResourceError> {
        self.add(path, text.as_bytes().to_vec())
    }

    pub fn add_shared(
        &self,
        path: impl Into<String>,
        data: SharedResourceData,
    ) -> Result<(), ResourceError> {
        let path = path.into();
        let mut resources = self.resources.write().map_err(|_| poisoned(&path))?;
        resources.insert(path, data);
        Ok(())
    }

    pub fn remove(&self, path: &str) -> Option<SharedResourceData> {
        self.resources.write().ok()?.remove(path)
    }

    pub fn clear(&self) {
        if let Ok(mut resources) = self.resources.write() {
            resources.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| poisoned(path))?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_add_and_load() {
        let provider = InMemoryResourceProvider::new();
        provider
            .add_text("https://host/manual/en_us/hammer.txt", "Hammer\nA tool")
            .unwrap();

        let data = provider.load("https://host/manual/en_us/hammer.txt").unwrap();
        assert_eq!(&*data, b"Hammer\nA tool");
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_in_memory_not_found() {
        let provider = InMemoryResourceProvider::new();
        let err = provider.load("missing.json").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
        assert!(err.is_missing());
    }

    #[test]
    fn test_in_memory_overwrite_and_remove() {
        let provider = InMemoryResourceProvider::from_text([("a.json", "{}")]).unwrap();
        provider.add_text("a.json", "[]").unwrap();
        assert_eq!(&*provider.load("a.json").unwrap(), b"[]");

        assert!(provider.remove("a.json").is_some());
        assert!(!provider.exists("a.json"));
        assert!(provider.remove("a.json").is_none());
    }

    #[test]
    fn test_in_memory_clear() {
        let provider = InMemoryResourceProvider::from_text([("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(provider.len(), 2);
        provider.clear();
        assert!(provider.is_empty());
        assert!(provider.base_path().is_none());
    }

    #[test]
    fn test_status_error_display() {
        let err = ResourceError::Status {
            url: "https://host/x.png".to_string(),
            status: 404,
        };
        assert!(err.to_string().contains("404"));
        assert!(err.is_missing());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let converted: ResourceError = io_err.into();
        assert!(matches!(converted, ResourceError::Io(_)));
        assert!(!converted.is_missing());
    }
}
