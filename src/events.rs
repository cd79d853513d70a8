// src/events.rs

use folio_types::{BranchId, EntryKey, LanguageId};

/// Notifications published by a [`ManualStore`](crate::ManualStore).
///
/// Every event carries the generation it belongs to; a front end should ignore
/// events older than the store's current generation.
#[derive(Debug, Clone, PartialEq)]
pub enum ManualEvent {
    /// A full load finished: translations, categories and listed entries.
    ManualReady {
        branch: BranchId,
        language: LanguageId,
        generation: u64,
        entries: usize,
    },
    /// An entry requested through a link finished loading and can be opened.
    EntryReady { key: EntryKey, generation: u64 },
    /// A linked entry could not be loaded.
    EntryFailed {
        key: EntryKey,
        generation: u64,
        message: String,
    },
}

impl ManualEvent {
    pub fn generation(&self) -> u64 {
        match self {
            ManualEvent::ManualReady { generation, .. }
            | ManualEvent::EntryReady { generation, .. }
            | ManualEvent::EntryFailed { generation, .. } => *generation,
        }
    }
}
