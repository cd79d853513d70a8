//! Defines the error type for manual loading and entry building.

use folio_layout::LayoutError;
use folio_traits::ResourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManualError {
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Layout error: {0}")]
    Layout(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Load superseded: started in generation {expected}, store is at {found}")]
    Stale { expected: u64, found: u64 },
    #[error("No entry named '{0}'")]
    EntryNotFound(String),
    #[error("Other manual error: {0}")]
    Other(String),
}

impl From<LayoutError> for ManualError {
    fn from(e: LayoutError) -> Self {
        ManualError::Layout(e.to_string())
    }
}

impl ManualError {
    pub fn is_stale(&self) -> bool {
        matches!(self, ManualError::Stale { .. })
    }
}
