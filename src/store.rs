// src/store.rs
//!
//! The manual registry: categories, loaded entries and their built pages.
//!
//! Every [`ManualStore::load`] or [`ManualStore::clear`] starts a new
//! generation. Work that began under an older generation checks the counter
//! before writing and is discarded with [`ManualError::Stale`] if a newer load
//! has started since.

use crate::config::ManualConfig;
use crate::events::ManualEvent;
use crate::links::{LinkQueue, LinkRequest};
use folio_core::repository::DEFAULT_LANGUAGE;
use folio_core::{
    Catalog, Category, EmbeddedResolver, EntryBuilder, EntryDocument, ManualError,
    RepositoryPaths, Translator, prefix_manual,
};
use folio_idf::{ContentNode, EntryData, PageSequence};
use folio_render::{HtmlRenderer, ListingItem, ListingKind, Navigator, ViewState};
use folio_traits::{ContentCache, Translate};
use folio_types::{BranchId, EntryKey, LanguageId};
use log::{debug, info, trace, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Title key of the top-level listing.
pub const INDEX_TITLE: &str = "manual";

/// Where a location hash points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The list of top-level categories.
    Index,
    Category(String),
    Entry {
        key: EntryKey,
        anchor: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    branch: BranchId,
    language: LanguageId,
}

#[derive(Debug, Default)]
struct StoreState {
    selection: Option<Selection>,
    catalog: Catalog,
    entries: HashMap<EntryKey, Arc<EntryDocument>>,
    pages: HashMap<EntryKey, Arc<PageSequence>>,
}

/// Generation-stamped registry of one manual.
#[derive(Debug)]
pub struct ManualStore {
    config: ManualConfig,
    paths: RepositoryPaths,
    cache: Arc<dyn ContentCache>,
    translator: Arc<Translator>,
    builder: EntryBuilder,
    links: Arc<LinkQueue>,
    generation: Arc<AtomicU64>,
    state: RwLock<StoreState>,
    events_tx: async_channel::Sender<ManualEvent>,
    events_rx: async_channel::Receiver<ManualEvent>,
}

impl ManualStore {
    /// Assembles a store. Use [`ManualBuilder`](crate::ManualBuilder), which
    /// also starts the link workers.
    pub(crate) fn new(
        config: ManualConfig,
        cache: Arc<dyn ContentCache>,
    ) -> (Self, async_channel::Receiver<LinkRequest>) {
        let paths = RepositoryPaths::new(config.repository_url.clone());
        let translator = Arc::new(Translator::new());
        let generation = Arc::new(AtomicU64::new(0));
        let (links, link_rx) = LinkQueue::new(config.link_queue_capacity, generation.clone());
        let links = Arc::new(links);
        let resolver = Arc::new(EmbeddedResolver::new(
            cache.clone(),
            paths.clone(),
            translator.clone(),
        ));
        let builder = EntryBuilder::new(resolver, links.clone()).with_geometry(config.geometry);
        let (events_tx, events_rx) = async_channel::bounded(config.event_capacity);

        let store = Self {
            config,
            paths,
            cache,
            translator,
            builder,
            links,
            generation,
            state: RwLock::new(StoreState::default()),
            events_tx,
            events_rx,
        };
        (store, link_rx)
    }

    pub fn config(&self) -> &ManualConfig {
        &self.config
    }

    pub fn paths(&self) -> &RepositoryPaths {
        &self.paths
    }

    pub fn translator(&self) -> &Arc<Translator> {
        &self.translator
    }

    pub fn links(&self) -> &Arc<LinkQueue> {
        &self.links
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// A receiver for store events. All receivers share one stream.
    pub fn subscribe(&self) -> async_channel::Receiver<ManualEvent> {
        self.events_rx.clone()
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, StoreState>, ManualError> {
        self.state
            .read()
            .map_err(|_| ManualError::Other("manual store lock poisoned".to_string()))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, StoreState>, ManualError> {
        self.state
            .write()
            .map_err(|_| ManualError::Other("manual store lock poisoned".to_string()))
    }

    fn ensure_current(&self, generation: u64) -> Result<(), ManualError> {
        let found = self.generation();
        if found != generation {
            return Err(ManualError::Stale {
                expected: generation,
                found,
            });
        }
        Ok(())
    }

    /// Write access, only while `generation` is still current.
    fn write_current(
        &self,
        generation: u64,
    ) -> Result<RwLockWriteGuard<'_, StoreState>, ManualError> {
        let state = self.write_state()?;
        self.ensure_current(generation)?;
        Ok(state)
    }

    fn emit(&self, event: ManualEvent) {
        if let Err(e) = self.events_tx.try_send(event) {
            debug!("dropping undelivered event: {}", e);
        }
    }

    /// Forgets everything and starts a new generation.
    pub fn clear(&self) -> Result<u64, ManualError> {
        self.reset(None)
    }

    fn reset(&self, selection: Option<Selection>) -> Result<u64, ManualError> {
        let mut state = self.write_state()?;
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        *state = StoreState {
            selection,
            ..StoreState::default()
        };
        self.translator.reset();
        self.cache.clear();
        debug!("manual store reset to generation {}", generation);
        Ok(generation)
    }

    /// The branch and language of the current load, if any.
    pub fn selection(&self) -> Option<(BranchId, LanguageId)> {
        self.read_state()
            .ok()?
            .selection
            .as_ref()
            .map(|s| (s.branch.clone(), s.language.clone()))
    }

    /// Loads translations, categories and every listed entry of a branch.
    ///
    /// Returns the generation of this load. Fails with [`ManualError::Stale`]
    /// if another load started before this one finished.
    pub async fn load(&self, branch: &BranchId, language: &LanguageId) -> Result<u64, ManualError> {
        if self.config.is_excluded_branch(branch.as_str()) {
            return Err(ManualError::Config(format!("Branch '{}' is not supported", branch)));
        }
        if !self.config.is_supported_language(language.as_str()) {
            return Err(ManualError::Config(format!(
                "Language '{}' is not supported",
                language
            )));
        }

        let start = Instant::now();
        let generation = self.reset(Some(Selection {
            branch: branch.clone(),
            language: language.clone(),
        }))?;
        info!("Loading manual {} / {} (generation {})", branch, language, generation);

        self.load_translations(generation, branch, language).await?;

        let autoload = self.fetch_json(&self.paths.autoload(branch)).await?;
        let catalog = Catalog::from_autoload(&autoload);
        let listed = catalog.all_entries();
        debug!("{} categories list {} entries", catalog.len(), listed.len());
        self.write_current(generation)?.catalog = catalog;

        let mut loaded = 0;
        for key in &listed {
            match self.load_entry(generation, branch, language, key).await {
                Ok(_) => loaded += 1,
                Err(e) if e.is_stale() => return Err(e),
                Err(e) => warn!("Skipping entry '{}': {}", key, e),
            }
        }
        self.ensure_current(generation)?;

        info!(
            "Manual {} / {} ready: {} of {} entries in {:?}",
            branch,
            language,
            loaded,
            listed.len(),
            start.elapsed()
        );
        self.emit(ManualEvent::ManualReady {
            branch: branch.clone(),
            language: language.clone(),
            generation,
            entries: loaded,
        });
        Ok(generation)
    }

    async fn load_translations(
        &self,
        generation: u64,
        branch: &BranchId,
        language: &LanguageId,
    ) -> Result<(), ManualError> {
        let mut languages = vec![LanguageId::new(DEFAULT_LANGUAGE)];
        if language.as_str() != DEFAULT_LANGUAGE {
            languages.push(language.clone());
        }
        for lang in &languages {
            match self.fetch_json(&self.paths.lang_file(branch, lang)).await {
                Ok(file) => {
                    let _state = self.write_current(generation)?;
                    let count = self.translator.add_translations_json(&file);
                    debug!("Loaded {} translations for {}", count, lang);
                }
                Err(e) => warn!("No translations for {}: {}", lang, e),
            }
        }
        Ok(())
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, ManualError> {
        let bytes = self.cache.get_or_fetch(url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_text(&self, url: &str) -> Result<String, ManualError> {
        let bytes = self.cache.get_or_fetch(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Ensures an entry is loaded. Idempotent.
    pub async fn resolve_entry(
        &self,
        branch: &BranchId,
        language: &LanguageId,
        key: &EntryKey,
    ) -> Result<(), ManualError> {
        self.load_entry(self.generation(), branch, language, key)
            .await
            .map(|_| ())
    }

    /// Loads one entry; `Ok(true)` if this call registered it.
    async fn load_entry(
        &self,
        generation: u64,
        branch: &BranchId,
        language: &LanguageId,
        key: &EntryKey,
    ) -> Result<bool, ManualError> {
        if self.has_entry(key) {
            return Ok(false);
        }

        let data = match self.fetch_json(&self.paths.entry_data(branch, key.as_str())).await {
            Ok(value) => EntryData::from_value(value),
            Err(e) => {
                debug!("No data for entry '{}': {}", key, e);
                EntryData::default()
            }
        };

        let text_url = self.paths.entry_text(branch, language, key.as_str());
        let text = match self.fetch_text(&text_url).await {
            Ok(text) => text,
            Err(e) if language.as_str() != DEFAULT_LANGUAGE => {
                debug!("No {} text for '{}' ({}), using {}", language, key, e, DEFAULT_LANGUAGE);
                let fallback = LanguageId::new(DEFAULT_LANGUAGE);
                self.fetch_text(&self.paths.entry_text(branch, &fallback, key.as_str()))
                    .await?
            }
            Err(e) => return Err(e),
        };

        let document = EntryDocument::parse(key.clone(), &text, data);
        let mut state = self.write_current(generation)?;
        if state.entries.contains_key(key) {
            return Ok(false);
        }
        self.translator
            .add_translation(prefix_manual(key.as_str()), document.title.clone());
        trace!("registered entry '{}'", key);
        state.entries.insert(key.clone(), Arc::new(document));
        Ok(true)
    }

    pub(crate) async fn handle_link_request(&self, request: LinkRequest) {
        if request.generation != self.generation() {
            debug!("ignoring link to '{}' from an older load", request.key);
            return;
        }
        let Some((branch, language)) = self.selection() else {
            debug!("no manual loaded; ignoring link to '{}'", request.key);
            return;
        };
        match self
            .load_entry(request.generation, &branch, &language, &request.key)
            .await
        {
            Ok(true) => self.emit(ManualEvent::EntryReady {
                key: request.key,
                generation: request.generation,
            }),
            Ok(false) => trace!("link target '{}' already loaded", request.key),
            Err(e) if e.is_stale() => debug!("link to '{}' superseded: {}", request.key, e),
            Err(e) => {
                warn!("Linked entry '{}' failed to load: {}", request.key, e);
                self.emit(ManualEvent::EntryFailed {
                    key: request.key,
                    generation: request.generation,
                    message: e.to_string(),
                });
            }
        }
    }

    pub fn has_entry(&self, key: &EntryKey) -> bool {
        self.read_state()
            .map(|s| s.entries.contains_key(key))
            .unwrap_or(false)
    }

    pub fn entry(&self, key: &EntryKey) -> Option<Arc<EntryDocument>> {
        self.read_state().ok()?.entries.get(key).cloned()
    }

    pub fn entry_count(&self) -> usize {
        self.read_state().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn category(&self, key: &str) -> Option<Category> {
        self.read_state().ok()?.catalog.get(key).cloned()
    }

    pub fn toplevel_categories(&self) -> Vec<Category> {
        self.read_state()
            .map(|s| s.catalog.toplevel().cloned().collect())
            .unwrap_or_default()
    }

    /// Builds an entry's pages on first request and keeps them for the
    /// current generation.
    pub async fn entry_pages(&self, key: &EntryKey) -> Result<Arc<PageSequence>, ManualError> {
        let generation = self.generation();
        let cached = self.read_state()?.pages.get(key).cloned();
        if let Some(pages) = cached {
            return Ok(pages);
        }
        let (branch, language) = self
            .selection()
            .ok_or_else(|| ManualError::Other("no manual has been loaded".to_string()))?;

        let document = match self.entry(key) {
            Some(document) => document,
            None => {
                self.load_entry(generation, &branch, &language, key).await?;
                self.entry(key)
                    .ok_or_else(|| ManualError::EntryNotFound(key.to_string()))?
            }
        };

        let start = Instant::now();
        let pages = Arc::new(self.builder.build_document(&document, &branch, &language).await);
        debug!("Built '{}' into {} pages in {:?}", key, pages.len(), start.elapsed());

        let mut state = self.write_current(generation)?;
        Ok(state.pages.entry(key.clone()).or_insert(pages).clone())
    }

    /// Parses a location hash such as `hammer?crafting`.
    ///
    /// Unknown keys fall back to the index.
    pub fn route(&self, hash: &str) -> Route {
        let hash = hash.trim_start_matches('#');
        let (key, anchor) = match hash.split_once('?') {
            Some((key, anchor)) => (key, Some(anchor.to_string())),
            None => (hash, None),
        };
        if key.is_empty() {
            return Route::Index;
        }
        let Ok(state) = self.read_state() else {
            return Route::Index;
        };
        if state.catalog.contains(key) {
            return Route::Category(key.to_string());
        }
        let entry_key = EntryKey::new(key);
        if state.entries.contains_key(&entry_key) {
            return Route::Entry {
                key: entry_key,
                anchor,
            };
        }
        debug!("unknown route '{}', showing the index", key);
        Route::Index
    }

    /// Renders the view a location hash points at.
    ///
    /// `page` selects the entry page, unless the hash names an anchor.
    pub async fn render_route(
        &self,
        hash: &str,
        page: usize,
        view: &ViewState,
    ) -> Result<String, ManualError> {
        match self.route(hash) {
            Route::Index => Ok(self.render_index()),
            Route::Category(key) => Ok(self.render_category(&key)),
            Route::Entry { key, anchor } => {
                let pages = self.entry_pages(&key).await?;
                let document = self
                    .entry(&key)
                    .ok_or_else(|| ManualError::EntryNotFound(key.to_string()))?;
                let mut navigator = Navigator::new(pages.len());
                let target = anchor
                    .as_deref()
                    .and_then(|a| page_of_anchor(&pages, a))
                    .unwrap_or(page);
                navigator.go_to(target);
                let renderer = HtmlRenderer::new(self.translator.as_ref(), view);
                Ok(folio_render::render_entry_view(
                    &self.translator.translate(&prefix_manual(key.as_str()), &[]),
                    &document.subtitle,
                    &pages,
                    &navigator,
                    &renderer,
                ))
            }
        }
    }

    fn render_index(&self) -> String {
        let items: Vec<ListingItem> = self
            .toplevel_categories()
            .into_iter()
            .map(|c| ListingItem {
                label_key: prefix_manual(&c.key),
                route: c.key,
                kind: ListingKind::Category,
            })
            .collect();
        folio_render::render_listing(&prefix_manual(INDEX_TITLE), &items, self.translator.as_ref())
    }

    fn render_category(&self, key: &str) -> String {
        let Some(category) = self.category(key) else {
            return self.render_index();
        };
        let subcategories = category.subcategories.iter().map(|sub| ListingItem {
            route: sub.clone(),
            label_key: prefix_manual(sub),
            kind: ListingKind::Category,
        });
        let entries = category.entries.iter().map(|entry| ListingItem {
            route: entry.to_string(),
            label_key: prefix_manual(entry.as_str()),
            kind: ListingKind::Entry,
        });
        let items: Vec<ListingItem> = subcategories.chain(entries).collect();
        folio_render::render_listing(&prefix_manual(key), &items, self.translator.as_ref())
    }
}

/// Index of the page holding anchor `name`.
pub fn page_of_anchor(pages: &PageSequence, name: &str) -> Option<usize> {
    pages.iter().position(|page| {
        page.nodes()
            .iter()
            .filter_map(ContentNode::as_anchor)
            .any(|a| a.name.as_str() == name)
    })
}
