//! Serves manual resources from a local checkout of the content repository.
//!
//! Resource URLs are mapped onto the checkout by stripping an optional URL
//! prefix (normally the repository base URL). Paths that would resolve outside
//! the checkout are refused.

use folio_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    root: PathBuf,
    /// Canonicalized root for containment checks.
    canonical_root: Option<PathBuf>,
    url_prefix: Option<String>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
            url_prefix: None,
        }
    }

    /// Treats URLs starting with `prefix` as paths relative to the checkout.
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = Some(prefix.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative<'p>(&self, url: &'p str) -> &'p str {
        let stripped = self
            .url_prefix
            .as_deref()
            .and_then(|prefix| url.strip_prefix(prefix))
            .unwrap_or(url);
        stripped.trim_start_matches('/')
    }

    /// Maps `url` to a file inside the checkout, or `None` if it would escape it.
    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let relative = self.relative(url);
        let relative_path = Path::new(relative);
        if relative.contains("://") || relative_path.is_absolute() {
            return None;
        }
        if relative_path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        let full = self.root.join(relative_path);
        if let (Ok(canonical), Some(root)) = (full.canonicalize(), &self.canonical_root) {
            // Symlinks may still point elsewhere.
            return canonical.starts_with(root).then_some(canonical);
        }
        Some(full)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full = self
            .resolve(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside repository)", path)))?;
        log::trace!("reading {}", full.display());
        std::fs::read(&full).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|p| p.is_file())
    }

    fn base_path(&self) -> Option<&str> {
        self.root.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
