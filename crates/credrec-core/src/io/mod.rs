//! Delimited-text ingestion/export and text previews.

mod delimited;
mod preview;

pub use delimited::{read_table, read_table_from_path, write_table, write_table_to_path};
pub use preview::render_preview;

/// File name of the missing-credit report.
pub const REPORT_FILE: &str = "Missing_Credit_Report.csv";

/// File name of the sorted base table.
pub const SORTED_BASE_FILE: &str = "sorted_base.csv";

/// File name of the sorted comparer table.
pub const SORTED_COMPARER_FILE: &str = "sorted_comparer.csv";
