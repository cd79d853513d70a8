//! Size estimation and pagination.
//!
//! Entries are laid out on a fixed virtual page (see [`PageGeometry`]); node
//! sizes are character-count estimates, not measurements.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error(
        "Invalid page geometry: {lines_per_page} lines of {chars_per_line} characters holds nothing."
    )]
    InvalidGeometry {
        lines_per_page: usize,
        chars_per_line: usize,
    },
}

pub mod algorithms;
pub mod config;
pub mod estimate;
pub mod text;

pub use self::algorithms::{PaginationCursor, paginate};
pub use self::config::PageGeometry;
pub use self::estimate::{embedded_height, node_cost, reserved_size};
