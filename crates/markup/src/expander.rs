//! Markup Expander: raw entry text to a tree of typed nodes.

use crate::fragment::{Fragment, replace_pass, strip_literal};
use crate::linearize::flatten;
use crate::patterns;
use folio_idf::{AnchorData, AnchorNode, ContentNode, Descriptor, EntryData, FormatCode, LinkTarget};
use folio_layout::embedded_height;
use folio_traits::LinkSink;
use folio_types::{AnchorName, ConfigKey, EntryKey};
use regex::Captures;

/// Expands manual markup for one entry.
///
/// Links to other entries are reported to the [`LinkSink`] as they are found;
/// the expander never waits on them.
pub struct Expander<'a> {
    data: &'a EntryData,
    links: &'a dyn LinkSink,
}

impl<'a> Expander<'a> {
    pub fn new(data: &'a EntryData, links: &'a dyn LinkSink) -> Self {
        Self { data, links }
    }

    /// Applies every substitution pass, in order, to `text`.
    pub fn expand(&self, text: &str) -> Vec<Fragment> {
        let mut tree = vec![Fragment::Str(text.to_string())];

        tree = replace_pass(tree, &patterns::PAGE_BREAK, &mut |_| {
            Fragment::Node(ContentNode::PageBreak)
        });
        tree = replace_pass(tree, &patterns::LINK, &mut |caps| self.link(caps));
        tree = replace_pass(tree, &patterns::FORMATTING, &mut |caps| self.formatting(caps));
        tree = replace_pass(tree, &patterns::CONFIG_INT, &mut |caps| {
            Fragment::Node(ContentNode::ConfigInt {
                key: ConfigKey::new(&caps[1]),
            })
        });
        tree = replace_pass(tree, &patterns::CONFIG_BOOL, &mut |caps| self.config_bool(caps));
        tree = replace_pass(tree, &patterns::CONFIG_INT_ARRAY, &mut |caps| {
            Fragment::Node(ContentNode::ConfigIntArray {
                key: ConfigKey::new(&caps[1]),
                extra: caps.get(2).map(|m| m.as_str().to_string()),
            })
        });
        tree = replace_pass(tree, &patterns::ANCHOR, &mut |caps| {
            let anchors = make_anchors(&caps[1], self.data);
            Fragment::Group(
                anchors
                    .into_iter()
                    .map(|a| Fragment::Node(ContentNode::Anchor(a)))
                    .collect(),
            )
        });
        tree = replace_pass(tree, &patterns::KEYBIND, &mut |caps| {
            Fragment::Node(ContentNode::Keybind {
                binding: caps[1].to_string(),
            })
        });
        tree = replace_pass(tree, &patterns::LINE_BREAK, &mut |_| {
            Fragment::Node(ContentNode::LineBreak)
        });
        strip_literal(tree, patterns::RESET)
    }

    /// Expands nested markup (labels, span bodies) straight to nodes.
    pub fn expand_inline(&self, text: &str) -> Vec<ContentNode> {
        flatten(self.expand(text))
    }

    fn link(&self, caps: &Captures<'_>) -> Fragment {
        let label = &caps[2];
        let target = match &caps[1] {
            patterns::SAME_ENTRY => LinkTarget::SameEntry,
            key => {
                let key = EntryKey::new(key);
                log::trace!("requesting linked entry '{}'", key);
                self.links.request_entry(&key);
                LinkTarget::Entry(key)
            }
        };
        Fragment::Node(ContentNode::Link {
            target,
            anchor: caps.get(3).map(|m| m.as_str().to_string()),
            children: self.expand_inline(label),
            estimated_length: label.chars().count(),
        })
    }

    fn formatting(&self, caps: &Captures<'_>) -> Fragment {
        let code = caps[1].chars().next().unwrap_or(' ');
        let body = &caps[2];
        // Re-append the reset so spans nested in the body close.
        let children = self.expand_inline(&format!("{}{}", body, patterns::RESET));
        Fragment::Node(ContentNode::Formatted {
            code: FormatCode(code),
            children,
            estimated_length: body.chars().count(),
        })
    }

    fn config_bool(&self, caps: &Captures<'_>) -> Fragment {
        let (on, off) = (&caps[2], &caps[3]);
        Fragment::Node(ContentNode::ConfigBool {
            key: ConfigKey::new(&caps[1]),
            on: self.expand_inline(on),
            off: self.expand_inline(off),
            estimated_length: on.chars().count().max(off.chars().count()),
        })
    }
}

/// Builds the anchor nodes for `name`: one per element when the entry data
/// holds an array, otherwise a single anchor.
pub fn make_anchors(name: &str, data: &EntryData) -> Vec<AnchorNode> {
    let anchor_name = AnchorName::new(name);
    match data.lookup(name) {
        AnchorData::Many(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let descriptor = Descriptor::new(item.clone());
                let height = embedded_height(Some(&descriptor));
                AnchorNode::new(anchor_name.clone(), Some(descriptor), height).with_ordinal(i)
            })
            .collect(),
        AnchorData::Single(item) => {
            let descriptor = Descriptor::new(item.clone());
            let height = embedded_height(Some(&descriptor));
            vec![AnchorNode::new(anchor_name, Some(descriptor), height)]
        }
        AnchorData::Missing => vec![AnchorNode::new(anchor_name, None, 0.0)],
    }
}
