//! Manual markup.
//!
//! Parsing happens in two stages: [`Expander::expand`] applies the ordered
//! substitution passes and yields a tree of [`Fragment`]s, then [`linearize`]
//! flattens it into the sequence pagination consumes.

pub mod expander;
pub mod fragment;
pub mod linearize;
pub mod patterns;

pub use expander::{Expander, make_anchors};
pub use fragment::Fragment;
pub use linearize::{MAX_DEPTH, START_ANCHOR, flatten, linearize};

use folio_idf::{ContentNode, EntryData};
use folio_traits::LinkSink;

/// Expands and linearizes entry text in one step.
pub fn parse_entry(text: &str, data: &EntryData, links: &dyn LinkSink) -> Vec<ContentNode> {
    let tree = Expander::new(data, links).expand(text);
    linearize(tree, data)
}
