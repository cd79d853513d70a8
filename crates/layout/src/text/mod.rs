pub mod wrapper;

pub use wrapper::{split_at_budget, split_chars, wrap_lines};
