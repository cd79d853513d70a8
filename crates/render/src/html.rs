//! HTML for content nodes and pages.

use crate::embedded::render_embedded;
use crate::escape::escape_html;
use crate::state::ViewState;
use folio_idf::{ContentNode, Page};
use folio_traits::Translate;

pub const TOOLTIP_CONFIG_BOOL: &str = "tooltip.config.boolean";
pub const TOOLTIP_CONFIG_INT: &str = "tooltip.config.int";
pub const TOOLTIP_CONFIG_ARRAY: &str = "tooltip.config.array";

pub struct HtmlRenderer<'a> {
    translator: &'a dyn Translate,
    state: &'a ViewState,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(translator: &'a dyn Translate, state: &'a ViewState) -> Self {
        Self { translator, state }
    }

    pub fn render_page(&self, page: &Page) -> String {
        format!(
            "<div class=\"pagecontent\">{}</div>",
            self.render_nodes(page.nodes())
        )
    }

    pub fn render_nodes(&self, nodes: &[ContentNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            self.render_node(node, &mut out);
        }
        out
    }

    fn tooltip(&self, key: &str, arg: &str, out: &mut String) {
        out.push_str("<div class=\"tooltip\">");
        out.push_str(&escape_html(&self.translator.translate(key, &[arg])));
        out.push_str("</div>");
    }

    fn render_node(&self, node: &ContentNode, out: &mut String) {
        match node {
            ContentNode::Text(s) => out.push_str(&escape_html(s)),
            ContentNode::LineBreak => out.push_str("<br/>"),
            ContentNode::PageBreak => {}
            ContentNode::Anchor(anchor) => {
                let key = anchor.key();
                out.push_str(&format!(
                    "<span class=\"anchor\" id=\"{}\">",
                    escape_html(&key)
                ));
                if let Some(element) = &anchor.element {
                    out.push_str(&render_embedded(element, &key, self.state));
                }
                out.push_str("</span>");
            }
            ContentNode::Link {
                target,
                anchor,
                children,
                ..
            } => {
                out.push_str(&format!(
                    "<a class=\"text-link\" href=\"#{}\">",
                    escape_html(&target.href(anchor.as_deref()))
                ));
                out.push_str(&self.render_nodes(children));
                out.push_str("</a>");
            }
            ContentNode::Formatted { code, children, .. } => {
                out.push_str(&format!("<span class=\"{}\">", code.css_class()));
                out.push_str(&self.render_nodes(children));
                out.push_str("</span>");
            }
            ContentNode::ConfigBool { key, on, off, .. } => {
                out.push_str(&format!(
                    "<span class=\"config-helper tooltip-hider\" data-config=\"{}\">?</span>",
                    escape_html(key.as_str())
                ));
                self.tooltip(TOOLTIP_CONFIG_BOOL, key.as_str(), out);
                let label = if self.state.toggles.option(key) == 0 { on } else { off };
                out.push_str(&format!(
                    "<span class=\"config bool\" title=\"{}\">",
                    escape_html(&self.translator.translate(key.as_str(), &[]))
                ));
                out.push_str(&self.render_nodes(label));
                out.push_str("</span>");
            }
            ContentNode::ConfigInt { key } => {
                out.push_str("<span class=\"config int tooltip-hider\">???</span>");
                self.tooltip(TOOLTIP_CONFIG_INT, key.as_str(), out);
            }
            ContentNode::ConfigIntArray { key, .. } => {
                out.push_str("<span class=\"config int-array tooltip-hider\">?, ?, ?</span>");
                self.tooltip(TOOLTIP_CONFIG_ARRAY, key.as_str(), out);
            }
            ContentNode::Keybind { binding } => {
                out.push_str(&format!(
                    "<span class=\"keybind\">{}</span>",
                    escape_html(&self.translator.translate(binding, &[]))
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_idf::{AnchorNode, EmbeddedContent, FormatCode, LinkTarget};
    use folio_traits::IdentityTranslator;
    use folio_types::{AnchorName, ConfigKey, EntryKey};
    use std::sync::Arc;

    fn render(nodes: &[ContentNode], state: &ViewState) -> String {
        HtmlRenderer::new(&IdentityTranslator, state).render_nodes(nodes)
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render(&[ContentNode::text("a<b"), ContentNode::LineBreak], &ViewState::new());
        assert_eq!(html, "a&lt;b<br/>");
    }

    #[test]
    fn test_link_and_formatting() {
        let node = ContentNode::Link {
            target: LinkTarget::Entry(EntryKey::new("wiring")),
            anchor: Some("relay".to_string()),
            children: vec![ContentNode::Formatted {
                code: FormatCode('l'),
                children: vec![ContentNode::text("wires")],
                estimated_length: 5,
            }],
            estimated_length: 5,
        };
        assert_eq!(
            render(&[node], &ViewState::new()),
            "<a class=\"text-link\" href=\"#wiring?relay\"><span class=\"formatting_l\">wires</span></a>"
        );
    }

    #[test]
    fn test_config_bool_follows_toggle() {
        let key = ConfigKey::new("safety");
        let node = ContentNode::ConfigBool {
            key: key.clone(),
            on: vec![ContentNode::text("enabled")],
            off: vec![ContentNode::text("disabled")],
            estimated_length: 8,
        };
        let mut state = ViewState::new();
        let html = render(std::slice::from_ref(&node), &state);
        assert!(html.contains(">enabled</span>"));
        assert!(html.contains("<div class=\"tooltip\">tooltip.config.boolean</div>"));
        state.toggles.toggle(&key);
        assert!(render(&[node], &state).contains(">disabled</span>"));
    }

    #[test]
    fn test_placeholders_and_keybind() {
        let html = render(
            &[
                ContentNode::ConfigInt {
                    key: ConfigKey::new("a"),
                },
                ContentNode::ConfigIntArray {
                    key: ConfigKey::new("b"),
                    extra: None,
                },
                ContentNode::Keybind {
                    binding: "key.sneak".to_string(),
                },
            ],
            &ViewState::new(),
        );
        assert!(html.contains("config int tooltip-hider\">???"));
        assert!(html.contains("config int-array tooltip-hider\">?, ?, ?"));
        assert!(html.contains("<span class=\"keybind\">key.sneak</span>"));
    }

    #[test]
    fn test_anchor_with_element() {
        let mut anchor = AnchorNode::new(AnchorName::new("mb"), None, 5.0);
        anchor.element = Some(Arc::new(EmbeddedContent::Multiblock {
            name: "Furnace".to_string(),
        }));
        let html = render(&[ContentNode::Anchor(anchor)], &ViewState::new());
        assert!(html.starts_with("<span class=\"anchor\" id=\"mb\"><div class=\"multiblock\">"));

        let empty = render(
            &[ContentNode::Anchor(AnchorNode::new(AnchorName::new("x"), None, 0.0))],
            &ViewState::new(),
        );
        assert_eq!(empty, "<span class=\"anchor\" id=\"x\"></span>");
    }

    #[test]
    fn test_page_wrapper() {
        let page = Page::new(vec![ContentNode::text("hi")]);
        let state = ViewState::new();
        let html = HtmlRenderer::new(&IdentityTranslator, &state).render_page(&page);
        assert_eq!(html, "<div class=\"pagecontent\">hi</div>");
    }
}
