use crate::LayoutError;
use serde::{Deserialize, Serialize};

/// The fixed virtual page every entry is laid out on.
///
/// Sizes are estimates in characters: a page holds `lines_per_page` lines of
/// `chars_per_line` characters each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    /// Defaults to `17`.
    pub lines_per_page: usize,
    /// Width of one line, also the cost of a line break. Defaults to `30`.
    pub chars_per_line: usize,
    /// Cost of an integer config placeholder. Defaults to `7`.
    pub placeholder_width: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            lines_per_page: 17,
            chars_per_line: 30,
            placeholder_width: 7,
        }
    }
}

impl PageGeometry {
    /// Creates a geometry, rejecting pages that could hold nothing.
    pub fn new(lines_per_page: usize, chars_per_line: usize) -> Result<Self, LayoutError> {
        Self {
            lines_per_page,
            chars_per_line,
            ..Self::default()
        }
        .validated()
    }

    pub fn with_placeholder_width(mut self, width: usize) -> Self {
        self.placeholder_width = width;
        self
    }

    pub fn validated(self) -> Result<Self, LayoutError> {
        if self.lines_per_page == 0 || self.chars_per_line == 0 {
            return Err(LayoutError::InvalidGeometry {
                lines_per_page: self.lines_per_page,
                chars_per_line: self.chars_per_line,
            });
        }
        Ok(self)
    }

    /// Page capacity in characters.
    pub fn capacity(&self) -> usize {
        self.lines_per_page * self.chars_per_line
    }
}
