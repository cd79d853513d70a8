//! Intermediate content model.
//!
//! Markup expansion produces a tree of [`ContentNode`]s; the linearizer flattens
//! it; pagination groups the flat sequence into a [`PageSequence`].

pub mod data;
pub mod embedded;
pub mod node;
pub mod page;

pub use data::{AnchorData, Descriptor, EntryData};
pub use embedded::{
    BlueprintRecipe, EmbeddedContent, GridCell, ImageTile, IngredientTooltip, PreparedIngredient,
    Recipe, RecipeGrid, ResourceLocation, shapeless_columns,
};
pub use node::{AnchorNode, ContentNode, FormatCode, LinkTarget, TextStr};
pub use page::{Page, PageSequence};

use std::sync::Arc;

/// A reference-counted container for shared, immutable data like fetched files.
pub type SharedData = Arc<Vec<u8>>;
