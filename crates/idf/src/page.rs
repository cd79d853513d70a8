//! Paginated output.

use crate::node::ContentNode;

/// One rendered page: an ordered run of leaf-level nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    nodes: Vec<ContentNode>,
}

impl Page {
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<ContentNode> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when the page has nothing but line breaks.
    pub fn is_blank(&self) -> bool {
        self.nodes.iter().all(ContentNode::is_line_break)
    }
}

/// The ordered pages of one entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageSequence {
    pages: Vec<Page>,
}

impl PageSequence {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}

impl IntoIterator for PageSequence {
    type Item = Page;
    type IntoIter = std::vec::IntoIter<Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a PageSequence {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_page() {
        assert!(Page::new(vec![ContentNode::LineBreak, ContentNode::LineBreak]).is_blank());
        assert!(Page::default().is_blank());
        assert!(!Page::new(vec![ContentNode::text("x")]).is_blank());
    }
}
