//! # folio
//!
//! A paginated manual viewer. Entry text written in a small markup language is
//! expanded into content nodes, paginated onto a fixed virtual page and
//! rendered to HTML.
//!
//! This crate ties the workspace together:
//! - [`ManualStore`]: the generation-stamped registry of categories and entries
//! - [`ManualBuilder`] / [`ManualConfig`]: construction and settings
//! - [`LinkQueue`]: background loading of linked entries
//! - [`ManualEvent`]: readiness notifications for front ends

pub mod builder;
pub mod config;
pub mod events;
#[cfg(feature = "remote")]
pub mod http;
pub mod links;
pub mod store;

pub use builder::ManualBuilder;
pub use config::ManualConfig;
pub use events::ManualEvent;
#[cfg(feature = "remote")]
pub use http::HttpFetcher;
pub use links::{LinkQueue, LinkRequest, spawn_link_workers};
pub use store::{ManualStore, Route, page_of_anchor};

pub use folio_core::{
    BranchId, Catalog, Category, EntryBuilder, EntryDocument, EntryKey, LanguageId, ManualError,
    PageGeometry, PageSequence, Translator,
};
pub use folio_render::{Navigator, ViewState};
