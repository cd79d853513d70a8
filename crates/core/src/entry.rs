//! Entry documents and the parse → resolve → paginate sequence.

use crate::special::EmbeddedResolver;
use folio_idf::{ContentNode, EntryData, PageSequence};
use folio_layout::{PageGeometry, paginate};
use folio_markup::parse_entry;
use folio_traits::LinkSink;
use folio_types::{BranchId, EntryKey, LanguageId};
use itertools::Itertools;
use std::sync::Arc;

/// A loaded entry: the text file split into title, subtitle and body, plus
/// its anchor data.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDocument {
    pub key: EntryKey,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub data: EntryData,
}

impl EntryDocument {
    /// The first line is the title, the second the subtitle.
    pub fn parse(key: EntryKey, raw_text: &str, data: EntryData) -> Self {
        let mut lines = raw_text.split('\n');
        let title = lines.next().unwrap_or_default().trim_end_matches('\r').to_string();
        let subtitle = lines.next().unwrap_or_default().trim_end_matches('\r').to_string();
        let body = lines.join("\n");
        Self {
            key,
            title,
            subtitle,
            body,
            data,
        }
    }
}

/// Builds the pages of an entry.
///
/// Link targets found while expanding are handed to the [`LinkSink`] without
/// waiting. Embedded content is resolved before pagination starts.
#[derive(Clone)]
pub struct EntryBuilder {
    geometry: PageGeometry,
    resolver: Arc<EmbeddedResolver>,
    links: Arc<dyn LinkSink>,
}

impl std::fmt::Debug for EntryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryBuilder")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl EntryBuilder {
    pub fn new(resolver: Arc<EmbeddedResolver>, links: Arc<dyn LinkSink>) -> Self {
        Self {
            geometry: PageGeometry::default(),
            resolver,
            links,
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub async fn build_entry(
        &self,
        raw_text: &str,
        data: &EntryData,
        branch: &BranchId,
        language: &LanguageId,
    ) -> PageSequence {
        let mut sequence = parse_entry(raw_text, data, self.links.as_ref());
        log::debug!(
            "Expanded entry into {} nodes ({}, {})",
            sequence.len(),
            branch,
            language
        );
        self.resolve_anchors(branch, &mut sequence).await;
        let pages = paginate(sequence, &self.geometry);
        log::debug!("Paginated entry into {} pages", pages.len());
        pages
    }

    pub async fn build_document(
        &self,
        document: &EntryDocument,
        branch: &BranchId,
        language: &LanguageId,
    ) -> PageSequence {
        self.build_entry(&document.body, &document.data, branch, language)
            .await
    }

    async fn resolve_anchors(&self, branch: &BranchId, sequence: &mut [ContentNode]) {
        for node in sequence.iter_mut() {
            let Some(anchor) = node.as_anchor_mut() else {
                continue;
            };
            let Some(descriptor) = anchor.descriptor.as_ref() else {
                continue;
            };
            let element = self.resolver.resolve(branch, descriptor).await;
            anchor.element = element.map(Arc::new);
        }
    }
}
