//! # folio-core
//!
//! Platform-agnostic manual engine.
//!
//! - **localization**: the translation table and placeholder formatting
//! - **repository**: URL layout of the content repository
//! - **catalog**: the category tree from `autoload.json`
//! - **special**: embedded content (recipes, blueprints, item displays, images)
//! - **entry**: entry documents and page building
//!
//! Nothing here touches the filesystem or the network directly; all fetches go
//! through the [`ContentCache`] seam.

pub use folio_idf as idf;
pub use folio_layout as layout;
pub use folio_markup as markup;
pub use folio_traits as traits;
pub use folio_types as types;

pub mod catalog;
pub mod entry;
pub mod error;
pub mod localization;
pub mod repository;
pub mod special;

pub use catalog::{Catalog, Category};
pub use entry::{EntryBuilder, EntryDocument};
pub use error::ManualError;
pub use localization::{Translator, format_translation, prefix_manual, upper_case_name};
pub use repository::{DEFAULT_LANGUAGE, MOD_ID, RepositoryPaths};
pub use special::EmbeddedResolver;

pub use folio_idf::{ContentNode, EntryData, PageSequence};
pub use folio_layout::PageGeometry;
pub use folio_traits::{ContentCache, ContentFetcher, LinkSink, Translate};
pub use folio_types::{BranchId, EntryKey, LanguageId};
