//! Values handed back to JavaScript.

use serde::Serialize;

/// Where an anchor landed after pagination.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPage {
    pub name: String,
    pub page: usize,
}

/// A paginated entry rendered to HTML, one string per page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedEntry {
    pub key: String,
    pub title: String,
    pub subtitle: String,
    pub pages: Vec<String>,
    pub anchors: Vec<AnchorPage>,
    /// Entries linked from this one, in first-seen order, for prefetching.
    pub links: Vec<String>,
}
