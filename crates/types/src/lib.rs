pub mod ids;

pub use ids::{AnchorName, BranchId, ConfigKey, EntryKey, LanguageId};
