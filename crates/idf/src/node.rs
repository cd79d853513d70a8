//! The closed set of content nodes produced by markup expansion.

use crate::data::Descriptor;
use crate::embedded::EmbeddedContent;
use folio_types::{AnchorName, ConfigKey, EntryKey};
use std::sync::Arc;

/// A string type for text runs.
pub type TextStr = String;

/// A formatting code, the character following `§` in manual text.
///
/// The viewer does not interpret the code beyond mapping it onto a CSS class,
/// so any character other than the reset code `r` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatCode(pub char);

impl FormatCode {
    pub const RESET: char = 'r';

    pub fn as_char(&self) -> char {
        self.0
    }

    pub fn css_class(&self) -> String {
        format!("formatting_{}", self.0)
    }
}

/// Where a link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// `<link;this;...>`: an anchor within the current entry.
    SameEntry,
    /// Another manual entry.
    Entry(EntryKey),
}

impl LinkTarget {
    pub fn entry(&self) -> Option<&EntryKey> {
        match self {
            LinkTarget::SameEntry => None,
            LinkTarget::Entry(key) => Some(key),
        }
    }

    /// The route fragment used when rendering the link, `key?anchor`.
    pub fn href(&self, anchor: Option<&str>) -> String {
        let base = self.entry().map(|k| k.as_str()).unwrap_or("");
        match anchor {
            Some(a) if !a.is_empty() => format!("{}?{}", base, a),
            _ => base.to_string(),
        }
    }
}

/// An insertion point for embedded content.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorNode {
    pub name: AnchorName,
    /// Position within a fanned-out anchor (`Some(i)` when the entry data held an array).
    pub ordinal: Option<usize>,
    pub descriptor: Option<Descriptor>,
    /// Vertical space, in lines, reserved for the embedded content.
    pub reserved_height: f32,
    /// Resolved embedded content, attached once the collaborator has answered.
    pub element: Option<Arc<EmbeddedContent>>,
}

impl AnchorNode {
    pub fn new(name: AnchorName, descriptor: Option<Descriptor>, reserved_height: f32) -> Self {
        Self {
            name,
            ordinal: None,
            descriptor,
            reserved_height,
            element: None,
        }
    }

    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    /// A stable key distinguishing fanned-out anchors, e.g. `recipes_1`.
    pub fn key(&self) -> String {
        match self.ordinal {
            Some(i) => format!("{}_{}", self.name, i),
            None => self.name.to_string(),
        }
    }
}

/// One node of an expanded manual entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    /// A run of plain text.
    Text(TextStr),
    /// A forced line break (`\n`, an escaped `\n`, or `<br>`).
    LineBreak,
    /// An explicit page break marker (`<np>`). Consumed by pagination.
    PageBreak,
    /// Embedded content insertion point (`<&name>`).
    Anchor(AnchorNode),
    /// A link to another entry or to an anchor in this one.
    Link {
        target: LinkTarget,
        anchor: Option<String>,
        children: Vec<ContentNode>,
        estimated_length: usize,
    },
    /// A `§x ... §r` formatted span.
    Formatted {
        code: FormatCode,
        children: Vec<ContentNode>,
        estimated_length: usize,
    },
    /// A label chosen by a boolean config option.
    ConfigBool {
        key: ConfigKey,
        on: Vec<ContentNode>,
        off: Vec<ContentNode>,
        estimated_length: usize,
    },
    /// An integer config value placeholder.
    ConfigInt { key: ConfigKey },
    /// An integer-array config value placeholder.
    ConfigIntArray {
        key: ConfigKey,
        extra: Option<String>,
    },
    /// A key binding, rendered through translation.
    Keybind { binding: String },
}

impl ContentNode {
    pub fn text(s: impl Into<TextStr>) -> Self {
        ContentNode::Text(s.into())
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, ContentNode::Anchor(_))
    }

    pub fn is_page_break(&self) -> bool {
        matches!(self, ContentNode::PageBreak)
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self, ContentNode::LineBreak)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentNode::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_anchor(&self) -> Option<&AnchorNode> {
        match self {
            ContentNode::Anchor(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_anchor_mut(&mut self) -> Option<&mut AnchorNode> {
        match self {
            ContentNode::Anchor(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a string identifier for the node type, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentNode::Text(_) => "text",
            ContentNode::LineBreak => "line-break",
            ContentNode::PageBreak => "page-break",
            ContentNode::Anchor(_) => "anchor",
            ContentNode::Link { .. } => "link",
            ContentNode::Formatted { .. } => "formatted",
            ContentNode::ConfigBool { .. } => "config-bool",
            ContentNode::ConfigInt { .. } => "config-int",
            ContentNode::ConfigIntArray { .. } => "config-int-array",
            ContentNode::Keybind { .. } => "keybind",
        }
    }

    /// Concatenated plain text of this node and its children, without markup.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(s) => out.push_str(s),
            ContentNode::LineBreak => out.push('\n'),
            ContentNode::Link { children, .. } | ContentNode::Formatted { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            ContentNode::ConfigBool { on, .. } => {
                for child in on {
                    child.collect_text(out);
                }
            }
            ContentNode::Keybind { binding } => out.push_str(binding),
            ContentNode::PageBreak
            | ContentNode::Anchor(_)
            | ContentNode::ConfigInt { .. }
            | ContentNode::ConfigIntArray { .. } => {}
        }
    }
}
