pub mod pagination;

pub use pagination::{BreakAnalysis, PaginationCursor, check_fit, paginate};
