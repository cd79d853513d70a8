//! WebAssembly bindings for the manual viewer.
//!
//! The browser front end drives the same engine as the native crate: markup
//! expansion, embedded content, pagination and HTML rendering. What differs is
//! how resources arrive.
//!
//! - **No tokio runtime**: promises wrap the engine's futures via `wasm-bindgen-futures`
//! - **No filesystem**: repository files live in memory, keyed by their URL
//! - **No background link workers**: link targets are returned with each entry
//!   so the page can prefetch them
//!
//! ## Module Structure
//!
//! - [`viewer`] - `ManualViewer`, the JavaScript entry point
//! - [`resources`] - in-memory resource store and Fetch API loading
//! - [`error`] - error types with JavaScript interop
//! - [`types`] - values serialized back to JavaScript
//!
//! # Example
//!
//! ```javascript
//! import init, { ManualViewer } from '@folio/wasm';
//!
//! await init();
//!
//! const viewer = new ManualViewer(null, "1.20.1", "en_us");
//! const entry = await viewer.renderEntry("demo", "Demo\nSubtitle\nHello <np> World", null);
//! console.log(entry.pages.length); // 2
//! ```

pub mod error;
pub mod resources;
pub mod types;
pub mod viewer;

pub use error::{ErrorCode, ViewerError};
pub use resources::WasmResourceProvider;
pub use types::{AnchorPage, RenderedEntry};
pub use viewer::ManualViewer;

use wasm_bindgen::prelude::*;

/// Sets up panic messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the version of the folio-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
