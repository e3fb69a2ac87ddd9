//! Ordering and set-difference operations over credit memo tables.

mod cache;
mod diff;
mod engine;
mod sort;

pub use cache::{CacheKey, ReportCache, Session};
pub use diff::{common_columns, diff, DIFF_COLUMNS};
pub use engine::{compare, reconcile};
pub use sort::{sort, sort_by_drug_and_quarter};
