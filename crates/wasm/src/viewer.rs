//! `ManualViewer`: the JavaScript entry point.
//!
//! The page loads repository files into the viewer's resource store, then asks
//! for entries. Entries come back fully paginated and rendered to HTML.

use crate::error::ViewerError;
use crate::resources::WasmResourceProvider;
use crate::types::{AnchorPage, RenderedEntry};
use folio_core::{
    BranchId, DEFAULT_LANGUAGE, EmbeddedResolver, EntryBuilder, EntryData, EntryDocument,
    EntryKey, LanguageId, LinkSink, ManualError, PageGeometry, PageSequence, RepositoryPaths,
    Translator,
};
use folio_idf::ContentNode;
use folio_render::{HtmlRenderer, ViewState};
use folio_resource::{MemoizingCache, ProviderFetcher};
use folio_traits::ContentCache;
use std::cell::RefCell;
use std::sync::{Arc, Mutex};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

const DEFAULT_BRANCH: &str = "1.20.1";

/// Collects link targets in first-seen order.
#[derive(Debug, Default)]
struct LinkCollector(Mutex<Vec<EntryKey>>);

impl LinkCollector {
    fn keys(&self) -> Vec<String> {
        self.0
            .lock()
            .map(|keys| keys.iter().map(|k| k.as_str().to_string()).collect())
            .unwrap_or_default()
    }
}

impl LinkSink for LinkCollector {
    fn request_entry(&self, key: &EntryKey) {
        if let Ok(mut keys) = self.0.lock() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
}

/// Renders manual entries from resources held in memory.
///
/// # Example
///
/// ```javascript
/// const viewer = new ManualViewer(null, "1.20.1", "en_us");
/// await viewer.addResourceFromUrl(viewer.entryTextUrl("hammer"));
/// await viewer.addResourceFromUrl(viewer.entryDataUrl("hammer"));
/// const entry = await viewer.renderStoredEntry("hammer");
/// document.querySelector(".page").innerHTML = entry.pages[0];
/// ```
#[wasm_bindgen]
pub struct ManualViewer {
    resources: WasmResourceProvider,
    paths: RepositoryPaths,
    branch: BranchId,
    language: LanguageId,
    geometry: PageGeometry,
    translator: Arc<Translator>,
    cache: RefCell<Arc<MemoizingCache>>,
}

#[wasm_bindgen]
impl ManualViewer {
    /// Create a viewer for one branch and language.
    ///
    /// `repository_url` defaults to the public GitHub raw content base.
    #[wasm_bindgen(constructor)]
    pub fn new(
        repository_url: Option<String>,
        branch: Option<String>,
        language: Option<String>,
    ) -> ManualViewer {
        let resources = WasmResourceProvider::new();
        let cache = Arc::new(Self::fresh_cache(&resources));
        ManualViewer {
            resources,
            paths: repository_url
                .map(RepositoryPaths::new)
                .unwrap_or_default(),
            branch: BranchId::new(branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string())),
            language: LanguageId::new(language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())),
            geometry: PageGeometry::default(),
            translator: Arc::new(Translator::new()),
            cache: RefCell::new(cache),
        }
    }

    /// Override the page size in lines and characters per line.
    #[wasm_bindgen(js_name = withPageSize)]
    pub fn with_page_size(
        mut self,
        lines_per_page: usize,
        chars_per_line: usize,
    ) -> Result<ManualViewer, JsValue> {
        self.geometry =
            PageGeometry::new(lines_per_page, chars_per_line).map_err(ViewerError::from)?;
        Ok(self)
    }

    /// The resource store backing this viewer.
    #[wasm_bindgen(getter)]
    pub fn resources(&self) -> WasmResourceProvider {
        self.resources.clone()
    }

    #[wasm_bindgen(js_name = addResource)]
    pub fn add_resource(&self, url: &str, data: &[u8]) -> Result<(), JsValue> {
        self.resources.add_resource(url, data)?;
        self.reset_cache();
        Ok(())
    }

    #[wasm_bindgen(js_name = addText)]
    pub fn add_text(&self, url: &str, text: &str) -> Result<(), JsValue> {
        self.resources.add_text(url, text)?;
        self.reset_cache();
        Ok(())
    }

    /// Fetch `url` and keep its body. Resolves to the number of bytes stored.
    #[wasm_bindgen(js_name = addResourceFromUrl)]
    pub fn add_resource_from_url(&self, url: String) -> js_sys::Promise {
        let resources = self.resources.clone();
        // Failures cached before this resource arrived must not stick.
        self.reset_cache();
        future_to_promise(async move {
            let len = resources.fetch_into(&url).await?;
            Ok(JsValue::from(len as u32))
        })
    }

    /// Forget cached fetch results. Needed after changing resources directly
    /// through the `resources` handle.
    #[wasm_bindgen(js_name = resetCache)]
    pub fn reset_cache(&self) {
        let fresh = Arc::new(Self::fresh_cache(&self.resources));
        self.cache.replace(fresh);
    }

    /// Merge a language file's `{key: value}` pairs into the translation table.
    #[wasm_bindgen(js_name = loadTranslations)]
    pub fn load_translations(&self, json: &str) -> Result<usize, JsValue> {
        let file: serde_json::Value = serde_json::from_str(json).map_err(ViewerError::from)?;
        Ok(self.translator.add_translations_json(&file))
    }

    #[wasm_bindgen]
    pub fn translate(&self, key: &str) -> String {
        folio_core::Translate::translate(self.translator.as_ref(), key, &[])
    }

    #[wasm_bindgen(js_name = entryTextUrl)]
    pub fn entry_text_url(&self, key: &str) -> String {
        self.paths.entry_text(&self.branch, &self.language, key)
    }

    #[wasm_bindgen(js_name = entryDataUrl)]
    pub fn entry_data_url(&self, key: &str) -> String {
        self.paths.entry_data(&self.branch, key)
    }

    #[wasm_bindgen(js_name = langFileUrl)]
    pub fn lang_file_url(&self) -> String {
        self.paths.lang_file(&self.branch, &self.language)
    }

    /// Paginate and render entry text the caller already holds.
    ///
    /// `data_json` is the entry's `{anchor: descriptor}` object, if any.
    /// Resolves to `{ key, title, subtitle, pages, anchors, links }`.
    #[wasm_bindgen(js_name = renderEntry)]
    pub fn render_entry(
        &self,
        key: String,
        text: String,
        data_json: Option<String>,
    ) -> Result<js_sys::Promise, JsValue> {
        let data = match data_json.as_deref() {
            Some(json) => EntryData::from_value(
                serde_json::from_str(json).map_err(ViewerError::from)?,
            ),
            None => EntryData::default(),
        };
        let document = EntryDocument::parse(EntryKey::new(key), &text, data);
        let job = self.job();
        Ok(future_to_promise(async move {
            let rendered = job.render(&document).await;
            Ok(serde_wasm_bindgen::to_value(&rendered)?)
        }))
    }

    /// Paginate and render an entry from the resource store.
    ///
    /// Text in the viewer's language falls back to `en_us`; missing entry data
    /// means the entry has no anchors.
    #[wasm_bindgen(js_name = renderStoredEntry)]
    pub fn render_stored_entry(&self, key: String) -> js_sys::Promise {
        let job = self.job();
        future_to_promise(async move {
            let key = EntryKey::new(key);
            let document = job.load_document(&key).await.map_err(ViewerError::from)?;
            let rendered = job.render(&document).await;
            Ok(serde_wasm_bindgen::to_value(&rendered)?)
        })
    }
}

impl ManualViewer {
    fn fresh_cache(resources: &WasmResourceProvider) -> MemoizingCache {
        MemoizingCache::new(Arc::new(ProviderFetcher::new(
            resources.as_resource_provider(),
        )))
    }

    fn job(&self) -> RenderJob {
        RenderJob {
            cache: self.cache.borrow().clone(),
            paths: self.paths.clone(),
            branch: self.branch.clone(),
            language: self.language.clone(),
            geometry: self.geometry,
            translator: self.translator.clone(),
        }
    }
}

/// Everything one render needs, detached from the viewer so it can move into a promise.
struct RenderJob {
    cache: Arc<MemoizingCache>,
    paths: RepositoryPaths,
    branch: BranchId,
    language: LanguageId,
    geometry: PageGeometry,
    translator: Arc<Translator>,
}

impl RenderJob {
    async fn fetch_text(&self, url: &str) -> Result<String, ManualError> {
        let bytes = self.cache.get_or_fetch(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn load_document(&self, key: &EntryKey) -> Result<EntryDocument, ManualError> {
        let data = match self
            .fetch_text(&self.paths.entry_data(&self.branch, key.as_str()))
            .await
        {
            Ok(json) => EntryData::from_value(serde_json::from_str(&json)?),
            Err(_) => EntryData::default(),
        };

        let text_url = self.paths.entry_text(&self.branch, &self.language, key.as_str());
        let text = match self.fetch_text(&text_url).await {
            Ok(text) => text,
            Err(e) if self.language.as_str() != DEFAULT_LANGUAGE => {
                log::debug!("No {} text for '{}' ({}), using {}", self.language, key, e, DEFAULT_LANGUAGE);
                let fallback = LanguageId::new(DEFAULT_LANGUAGE);
                self.fetch_text(&self.paths.entry_text(&self.branch, &fallback, key.as_str()))
                    .await
                    .map_err(|_| ManualError::EntryNotFound(key.to_string()))?
            }
            Err(_) => return Err(ManualError::EntryNotFound(key.to_string())),
        };

        Ok(EntryDocument::parse(key.clone(), &text, data))
    }

    async fn render(&self, document: &EntryDocument) -> RenderedEntry {
        let links = Arc::new(LinkCollector::default());
        let resolver = EmbeddedResolver::new(
            self.cache.clone(),
            self.paths.clone(),
            self.translator.clone(),
        );
        let builder = EntryBuilder::new(Arc::new(resolver), links.clone())
            .with_geometry(self.geometry);
        let pages = builder
            .build_document(document, &self.branch, &self.language)
            .await;

        let state = ViewState::new();
        let renderer = HtmlRenderer::new(self.translator.as_ref(), &state);
        RenderedEntry {
            key: document.key.to_string(),
            title: document.title.clone(),
            subtitle: document.subtitle.clone(),
            pages: pages.iter().map(|page| renderer.render_page(page)).collect(),
            anchors: anchor_pages(&pages),
            links: links.keys(),
        }
    }
}

fn anchor_pages(pages: &PageSequence) -> Vec<AnchorPage> {
    pages
        .iter()
        .enumerate()
        .flat_map(|(index, page)| {
            page.nodes()
                .iter()
                .filter_map(ContentNode::as_anchor)
                .map(move |anchor| AnchorPage {
                    name: anchor.key(),
                    page: index,
                })
        })
        .collect()
}
