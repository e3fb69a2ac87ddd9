//! Data models for tables, reports, and configuration.

pub mod config;
pub mod report;
pub mod table;

pub use config::CredrecConfig;
pub use report::{MissingIn, Report, ReportRow, ReportSummary, REPORT_COLUMNS};
pub use table::{ContentHash, Row, RowView, Table, Value};
