//! Error types for the credrec-core library.

use thiserror::Error;

/// Main error type for the credrec library.
#[derive(Error, Debug)]
pub enum CredrecError {
    /// Input table has the wrong shape or could not be parsed.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Reconciliation could not be performed.
    #[error("reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Report delivery failed.
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the shape or parsing of an input table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// A column the operation depends on is not present.
    #[error("missing required column: {column}")]
    MissingColumn { column: String },

    /// The delimited text could not be parsed into a table.
    #[error("malformed input: {0}")]
    Malformed(String),
}

/// Errors raised by the reconciliation operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReconcileError {
    /// Column-intersection diff was asked to compare tables with disjoint headers.
    #[error("no common columns found between the two files, cannot compare")]
    NoCommonColumns,
}

/// Errors related to sending a report to a recipient.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Recipient address failed format validation.
    #[error("invalid {kind} recipient: {value}")]
    InvalidRecipient { kind: &'static str, value: String },

    /// No configured notifier handles this recipient kind.
    #[error("no delivery channel configured for {0}")]
    Unsupported(String),

    /// The external provider rejected the message or could not be reached.
    #[error("{provider} delivery failed: {message}")]
    Provider { provider: String, message: String },

    /// The report could not be serialized for sending.
    #[error("failed to prepare report for delivery: {0}")]
    Export(String),
}

impl DeliveryError {
    pub fn provider(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for the credrec library.
pub type Result<T> = std::result::Result<T, CredrecError>;
