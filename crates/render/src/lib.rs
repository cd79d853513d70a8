//! Page Renderer / Navigator.
//!
//! Produces HTML strings; the host decides how to mount them.

pub mod embedded;
pub mod escape;
pub mod html;
pub mod navigator;
pub mod state;
pub mod view;

pub use embedded::{render_embedded, render_ingredient};
pub use escape::escape_html;
pub use html::HtmlRenderer;
pub use navigator::{Navigator, SWIPE_THRESHOLD, SwipeDirection};
pub use state::{ConfigToggles, ViewState};
pub use view::{
    ListingItem, ListingKind, render_entry_loading, render_entry_view, render_listing,
    render_manual_loading,
};
