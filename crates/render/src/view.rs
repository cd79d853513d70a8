//! Whole-screen views: an entry with its page footer, index listings, loading states.

use crate::escape::escape_html;
use crate::html::HtmlRenderer;
use crate::navigator::Navigator;
use folio_idf::PageSequence;
use folio_traits::Translate;
use itertools::Itertools;

pub const ENTRY_LOADING: &str = "Page is loading, please wait";
pub const MANUAL_LOADING: &str = "Please wait, the Engineer's Manual is being loaded...";

/// Renders an entry showing the navigator's current page.
pub fn render_entry_view(
    title: &str,
    subtitle: &str,
    pages: &PageSequence,
    navigator: &Navigator,
    renderer: &HtmlRenderer<'_>,
) -> String {
    let page = pages
        .get(navigator.current_page())
        .map(|p| renderer.render_page(p))
        .unwrap_or_default();
    let prev_off = if navigator.has_previous() { "" } else { " off" };
    let next_off = if navigator.has_next() { "" } else { " off" };
    format!(
        "<div class=\"entry\"><h2>{}</h2><h3>{}</h3><div class=\"page\">{}</div><footer><button class=\"page_prev{}\"></button><span class=\"page-number\">{}</span><button class=\"page_next{}\"></button></footer></div>",
        escape_html(title),
        escape_html(subtitle),
        page,
        prev_off,
        navigator.current_page() + 1,
        next_off
    )
}

pub fn render_entry_loading() -> String {
    format!("<span>{}</span>", ENTRY_LOADING)
}

pub fn render_manual_loading() -> String {
    format!(
        "<div id=\"please_wait\"><div class=\"clippy\"><div class=\"hand\"></div></div><p>{}</p></div>",
        MANUAL_LOADING
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Category,
    Entry,
}

impl ListingKind {
    fn class(&self) -> &'static str {
        match self {
            ListingKind::Category => "category",
            ListingKind::Entry => "entry",
        }
    }
}

/// One line of a category or index listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    /// Route the item links to.
    pub route: String,
    /// Translation key of the visible label.
    pub label_key: String,
    pub kind: ListingKind,
}

/// Renders a titled list of categories followed by entries.
pub fn render_listing(title_key: &str, items: &[ListingItem], translator: &dyn Translate) -> String {
    let rows = items
        .iter()
        .map(|item| {
            format!(
                "<li class=\"{}\"><a href=\"#{}\">{}</a></li>",
                item.kind.class(),
                escape_html(&item.route),
                escape_html(&translator.translate(&item.label_key, &[]))
            )
        })
        .join("");
    format!(
        "<h2>{}</h2><ul class=\"entry-list\">{}</ul>",
        escape_html(&translator.translate(title_key, &[])),
        rows
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewState;
    use folio_idf::{ContentNode, Page};
    use folio_traits::IdentityTranslator;

    fn pages() -> PageSequence {
        PageSequence::new(vec![
            Page::new(vec![ContentNode::text("one")]),
            Page::new(vec![ContentNode::text("two")]),
        ])
    }

    #[test]
    fn test_entry_view_first_page() {
        let state = ViewState::new();
        let renderer = HtmlRenderer::new(&IdentityTranslator, &state);
        let nav = Navigator::new(2);
        let html = render_entry_view("Hammer", "A tool", &pages(), &nav, &renderer);
        assert!(html.contains("<h2>Hammer</h2><h3>A tool</h3>"));
        assert!(html.contains("pagecontent\">one<"));
        assert!(html.contains("page_prev off"));
        assert!(html.contains("class=\"page_next\""));
        assert!(html.contains("<span class=\"page-number\">1</span>"));
    }

    #[test]
    fn test_entry_view_last_page() {
        let state = ViewState::new();
        let renderer = HtmlRenderer::new(&IdentityTranslator, &state);
        let mut nav = Navigator::new(2);
        nav.next();
        let html = render_entry_view("T", "S", &pages(), &nav, &renderer);
        assert!(html.contains("pagecontent\">two<"));
        assert!(html.contains("class=\"page_prev\""));
        assert!(html.contains("page_next off"));
        assert!(html.contains("page-number\">2<"));
    }

    #[test]
    fn test_listing() {
        let items = vec![
            ListingItem {
                route: "tools".to_string(),
                label_key: "manual.immersiveengineering.tools".to_string(),
                kind: ListingKind::Category,
            },
            ListingItem {
                route: "hammer".to_string(),
                label_key: "manual.immersiveengineering.hammer".to_string(),
                kind: ListingKind::Entry,
            },
        ];
        let html = render_listing("manual.immersiveengineering.manual", &items, &IdentityTranslator);
        assert!(html.starts_with("<h2>manual.immersiveengineering.manual</h2><ul class=\"entry-list\">"));
        assert!(html.contains("<li class=\"category\"><a href=\"#tools\">"));
        assert!(html.contains("<li class=\"entry\"><a href=\"#hammer\">"));
    }

    #[test]
    fn test_loading_placeholders() {
        assert_eq!(render_entry_loading(), "<span>Page is loading, please wait</span>");
        assert!(render_manual_loading().contains("please_wait"));
    }
}
