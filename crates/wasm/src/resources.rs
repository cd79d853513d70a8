//! Resource store for WASM environments.
//!
//! The page pushes repository files in, either as bytes it already holds or by
//! URL through the Fetch API. Resources are keyed by their full URL so the
//! engine's repository layout resolves them unchanged.

use crate::error::ViewerError;
use folio_traits::{InMemoryResourceProvider, ResourceProvider};
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// In-memory repository files shared with a [`ManualViewer`](crate::ManualViewer).
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct WasmResourceProvider {
    inner: Arc<InMemoryResourceProvider>,
}

#[wasm_bindgen]
impl WasmResourceProvider {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource from raw bytes under its URL.
    #[wasm_bindgen(js_name = addResource)]
    pub fn add_resource(&self, url: &str, data: &[u8]) -> Result<(), JsValue> {
        self.inner
            .add(url, data.to_vec())
            .map_err(ViewerError::from)?;
        Ok(())
    }

    /// Add a text resource (entry text, JSON) under its URL.
    #[wasm_bindgen(js_name = addText)]
    pub fn add_text(&self, url: &str, text: &str) -> Result<(), JsValue> {
        self.inner.add_text(url, text).map_err(ViewerError::from)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn exists(&self, url: &str) -> bool {
        self.inner.exists(url)
    }

    #[wasm_bindgen]
    pub fn remove(&self, url: &str) -> bool {
        self.inner.remove(url).is_some()
    }

    #[wasm_bindgen]
    pub fn clear(&self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl WasmResourceProvider {
    pub fn as_resource_provider(&self) -> Arc<dyn ResourceProvider> {
        self.inner.clone()
    }

    /// Fetch `url` and store the body under the same URL.
    pub async fn fetch_into(&self, url: &str) -> Result<usize, ViewerError> {
        let bytes = fetch_resource(url).await?;
        let len = bytes.len();
        self.inner.add(url, bytes)?;
        Ok(len)
    }
}

/// Fetch a resource from a URL using the Fetch API.
pub async fn fetch_resource(url: &str) -> Result<Vec<u8>, ViewerError> {
    let window =
        web_sys::window().ok_or_else(|| ViewerError::resource("No window object available"))?;

    let opts = web_sys::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web_sys::RequestMode::Cors);

    let request = web_sys::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| ViewerError::resource(format!("Failed to create request: {:?}", e)))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ViewerError::resource(format!("Fetch failed: {:?}", e)))?;

    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| ViewerError::resource("Failed to convert response"))?;

    if !response.ok() {
        return Err(ViewerError::resource(format!(
            "HTTP error for {}: {} {}",
            url,
            response.status(),
            response.status_text()
        )));
    }

    let array_buffer = JsFuture::from(
        response
            .array_buffer()
            .map_err(|e| ViewerError::resource(format!("Failed to get array buffer: {:?}", e)))?,
    )
    .await
    .map_err(|e| ViewerError::resource(format!("Failed to read response body: {:?}", e)))?;

    Ok(js_sys::Uint8Array::new(&array_buffer).to_vec())
}
