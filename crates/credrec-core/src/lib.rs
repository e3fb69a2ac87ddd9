//! Core library for credit memo reconciliation.
//!
//! This crate provides:
//! - CSV ingestion into loosely typed tables
//! - PO number normalization (identifier, quarter key, drug category)
//! - Bidirectional set difference into a missing-credit report
//! - Column-intersection diff with drug/quarter ordering
//! - Result caching keyed by input content
//! - Report delivery through pluggable notifiers

pub mod delivery;
pub mod error;
pub mod io;
pub mod models;
pub mod normalize;
pub mod reconcile;

pub use delivery::{DeliveryReceipt, Notifier, NotifierRouter, OutboxNotifier, Recipient};
pub use error::{CredrecError, DeliveryError, InputError, ReconcileError, Result};
pub use models::{CredrecConfig, MissingIn, Report, ReportRow, ReportSummary, Table, Value};
pub use normalize::{normalize, NormalizedTable};
pub use reconcile::{compare, diff, reconcile, sort, sort_by_drug_and_quarter, ReportCache, Session};
