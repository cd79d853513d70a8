//! Content Linearizer: flattens an expanded tree into one ordered sequence.

use crate::expander::make_anchors;
use crate::fragment::Fragment;
use folio_idf::{AnchorNode, ContentNode, EntryData};
use folio_types::AnchorName;

/// Nesting beyond this depth is treated as malformed and dropped.
pub const MAX_DEPTH: usize = 100;

/// Name of the anchor synthesized at the start of every entry.
pub const START_ANCHOR: &str = "start";

/// Flattens `tree` in order, dropping empty strings.
pub fn flatten(tree: Vec<Fragment>) -> Vec<ContentNode> {
    let mut out = Vec::new();
    flatten_into(tree, 0, &mut out);
    out
}

fn flatten_into(tree: Vec<Fragment>, depth: usize, out: &mut Vec<ContentNode>) {
    for fragment in tree {
        match fragment {
            Fragment::Str(s) if s.is_empty() => {}
            Fragment::Str(s) => out.push(ContentNode::Text(s)),
            Fragment::Node(ContentNode::Text(s)) if s.is_empty() => {}
            Fragment::Node(node) => out.push(node),
            Fragment::Group(inner) if depth >= MAX_DEPTH => {
                log::warn!(
                    "dropping {} fragments nested deeper than {}",
                    inner.len(),
                    MAX_DEPTH
                );
            }
            Fragment::Group(inner) => flatten_into(inner, depth + 1, out),
        }
    }
}

/// Flattens an entry's tree and guarantees it begins with an anchor.
///
/// When the content does not open with one, the `start` anchor is prepended,
/// described by the entry data's `start` key.
pub fn linearize(tree: Vec<Fragment>, data: &EntryData) -> Vec<ContentNode> {
    let mut sequence = flatten(tree);
    if !sequence.first().is_some_and(ContentNode::is_anchor) {
        let mut start = make_anchors(START_ANCHOR, data);
        // An empty `start` array fans out to nothing.
        if start.is_empty() {
            start.push(AnchorNode::new(AnchorName::new(START_ANCHOR), None, 0.0));
        }
        sequence.splice(0..0, start.into_iter().map(ContentNode::Anchor));
    }
    sequence
}
