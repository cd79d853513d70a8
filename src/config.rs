// src/config.rs
use folio_core::ManualError;
use folio_core::repository::{
    DEFAULT_LANGUAGE, DEFAULT_REPO_BASE, EXCLUDED_BRANCHES, SUPPORTED_LANGUAGES,
};
use folio_layout::PageGeometry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a [`ManualStore`](crate::ManualStore).
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualConfig {
    /// Base URL of the content repository.
    pub repository_url: String,
    /// Serve repository URLs from this local checkout instead of the network.
    pub local_root: Option<PathBuf>,
    pub default_branch: String,
    pub default_language: String,
    pub supported_languages: Vec<String>,
    /// Branches whose manual format is not supported.
    pub excluded_branches: Vec<String>,
    /// Background tasks resolving linked entries.
    pub link_workers: usize,
    pub link_queue_capacity: usize,
    /// Undelivered events beyond this are dropped.
    pub event_capacity: usize,
    pub geometry: PageGeometry,
}

impl Default for ManualConfig {
    fn default() -> Self {
        Self {
            repository_url: DEFAULT_REPO_BASE.to_string(),
            local_root: None,
            default_branch: "1.20.1".to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            supported_languages: SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            excluded_branches: EXCLUDED_BRANCHES.iter().map(|s| s.to_string()).collect(),
            link_workers: 2,
            link_queue_capacity: 64,
            event_capacity: 256,
            geometry: PageGeometry::default(),
        }
    }
}

impl ManualConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ManualError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ManualError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            ManualError::Config(format!("Failed to read config from '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&source)
    }

    pub fn validate(&self) -> Result<(), ManualError> {
        self.geometry.validated()?;
        if self.link_workers == 0 {
            return Err(ManualError::Config("link_workers must be at least 1".to_string()));
        }
        if self.link_queue_capacity == 0 || self.event_capacity == 0 {
            return Err(ManualError::Config("channel capacities must be at least 1".to_string()));
        }
        if !self.is_supported_language(&self.default_language) {
            return Err(ManualError::Config(format!(
                "Default language '{}' is not in supported_languages",
                self.default_language
            )));
        }
        if self.is_excluded_branch(&self.default_branch) {
            return Err(ManualError::Config(format!(
                "Default branch '{}' is excluded",
                self.default_branch
            )));
        }
        Ok(())
    }

    pub fn is_supported_language(&self, language: &str) -> bool {
        self.supported_languages.iter().any(|l| l == language)
    }

    pub fn is_excluded_branch(&self, branch: &str) -> bool {
        self.excluded_branches.iter().any(|b| b == branch)
    }
}
