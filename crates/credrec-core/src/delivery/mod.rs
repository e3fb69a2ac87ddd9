//! Report delivery to email addresses and phone numbers.
//!
//! The reconciliation core knows nothing about providers. A [`Notifier`]
//! receives a finished [`Report`] and a validated [`Recipient`]; email
//! channels attach the CSV export, phone channels send a short text preview.

mod outbox;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::DeliveryError;
use crate::io::render_preview;
use crate::models::report::Report;

pub use outbox::OutboxNotifier;

/// File name of the emailed attachment.
pub const ATTACHMENT_NAME: &str = crate::io::REPORT_FILE;

/// Default number of report rows in a phone message.
pub const MESSAGE_PREVIEW_ROWS: usize = 10;

/// Result type for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// A validated destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "address", rename_all = "snake_case")]
pub enum Recipient {
    Email(String),
    Phone(String),
}

impl Recipient {
    /// Email recipient; must contain `@` and `.`.
    pub fn email(address: &str) -> Result<Self> {
        let address = address.trim();
        if address.contains('@') && address.contains('.') {
            Ok(Self::Email(address.to_string()))
        } else {
            Err(DeliveryError::InvalidRecipient {
                kind: "email",
                value: address.to_string(),
            })
        }
    }

    /// Phone recipient; must be `+` followed by digits only.
    pub fn phone(number: &str) -> Result<Self> {
        let number = number.trim();
        let valid = number
            .strip_prefix('+')
            .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
        if valid {
            Ok(Self::Phone(number.to_string()))
        } else {
            Err(DeliveryError::InvalidRecipient {
                kind: "phone",
                value: number.to_string(),
            })
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Self::Email(a) | Self::Phone(a) => a,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.address())
    }
}

/// Acknowledgement from a notifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryReceipt {
    /// Notifier that handled the message.
    pub channel: String,
    pub recipient: Recipient,
    /// Provider message id or local path, when the channel reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl DeliveryReceipt {
    pub fn new(channel: impl Into<String>, recipient: &Recipient, reference: Option<String>) -> Self {
        Self {
            channel: channel.into(),
            recipient: recipient.clone(),
            reference,
            sent_at: Utc::now(),
        }
    }
}

/// A channel able to send a report.
pub trait Notifier {
    /// Channel name for logs and receipts.
    fn name(&self) -> &str;

    /// Whether this channel can reach the recipient.
    fn supports(&self, recipient: &Recipient) -> bool;

    /// Send the report.
    fn send(&self, report: &Report, recipient: &Recipient) -> Result<DeliveryReceipt>;
}

/// CSV attachment carried by email channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Export the whole report as a CSV attachment.
pub fn report_attachment(report: &Report) -> Result<Attachment> {
    let mut bytes = Vec::new();
    report
        .write_csv(&mut bytes)
        .map_err(|e| DeliveryError::Export(e.to_string()))?;
    Ok(Attachment {
        file_name: ATTACHMENT_NAME.to_string(),
        content_type: "text/csv",
        bytes,
    })
}

/// Plain-text body for email channels.
pub fn email_body(report: &Report) -> String {
    let summary = report.summary();
    format!(
        "Missing credit report attached.\n\n\
         Missing in comparer: {}\n\
         Missing in base: {}\n\
         Total rows: {}\n",
        summary.missing_in_comparer, summary.missing_in_base, summary.total
    )
}

/// Inline text preview of the first `rows` report rows for phone channels.
pub fn text_preview(report: &Report, rows: usize) -> String {
    if report.is_empty() {
        return "Missing credit report: no missing rows.".to_string();
    }
    format!(
        "Missing credit report ({} rows)\n{}",
        report.len(),
        render_preview(&report.to_table(), rows)
    )
}

/// Dispatches to the first notifier that supports the recipient.
#[derive(Default)]
pub struct NotifierRouter {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifiers.push(Box::new(notifier));
        self
    }

    pub fn push(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Notifier for NotifierRouter {
    fn name(&self) -> &str {
        "router"
    }

    fn supports(&self, recipient: &Recipient) -> bool {
        self.notifiers.iter().any(|n| n.supports(recipient))
    }

    fn send(&self, report: &Report, recipient: &Recipient) -> Result<DeliveryReceipt> {
        let notifier = self
            .notifiers
            .iter()
            .find(|n| n.supports(recipient))
            .ok_or_else(|| DeliveryError::Unsupported(recipient.kind().to_string()))?;

        tracing::info!("Sending report to {} via {}", recipient, notifier.name());
        notifier.send(report, recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{MissingIn, ReportRow};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn report(n: usize) -> Report {
        (0..n)
            .map(|i| ReportRow {
                po_number: format!("Q10{} ONMK A RBT", i),
                description: String::new(),
                credit_amount: "1.00".to_string(),
                missing_in: MissingIn::Comparer,
                drug_category: "a".to_string(),
                quarter_key: format!("q10{}", i),
            })
            .collect()
    }

    struct Recording {
        kind: &'static str,
        sent: RefCell<Vec<String>>,
    }

    impl Notifier for Recording {
        fn name(&self) -> &str {
            self.kind
        }

        fn supports(&self, recipient: &Recipient) -> bool {
            recipient.kind() == self.kind
        }

        fn send(&self, _report: &Report, recipient: &Recipient) -> Result<DeliveryReceipt> {
            self.sent.borrow_mut().push(recipient.address().to_string());
            Ok(DeliveryReceipt::new(self.kind, recipient, None))
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(Recipient::email("ops@example.com").is_ok());
        assert!(Recipient::email("ops@example").is_err());
        assert!(Recipient::email("ops.example.com").is_err());
    }

    #[test]
    fn test_phone_validation() {
        assert_eq!(Recipient::phone("+15551234567").unwrap().address(), "+15551234567");
        assert!(Recipient::phone("15551234567").is_err());
        assert!(Recipient::phone("+1 555 123").is_err());
        assert!(Recipient::phone("+").is_err());
        assert!(Recipient::phone("+1555-1234").is_err());
    }

    #[test]
    fn test_attachment_is_full_csv() {
        let attachment = report_attachment(&report(12)).unwrap();
        assert_eq!(attachment.file_name, "Missing_Credit_Report.csv");
        let text = String::from_utf8(attachment.bytes).unwrap();
        assert_eq!(text.lines().count(), 13);
    }

    #[test]
    fn test_text_preview_limits_rows() {
        let text = text_preview(&report(12), MESSAGE_PREVIEW_ROWS);
        assert!(text.starts_with("Missing credit report (12 rows)"));
        assert!(text.contains("Q109 ONMK A RBT"));
        assert!(!text.contains("Q1010"));
        assert!(text.contains("showing 10 of 12 rows"));
    }

    #[test]
    fn test_router_dispatches_by_kind() {
        let router = NotifierRouter::new()
            .with(Recording { kind: "email", sent: RefCell::new(Vec::new()) })
            .with(Recording { kind: "phone", sent: RefCell::new(Vec::new()) });

        let receipt = router
            .send(&report(1), &Recipient::phone("+4915112345678").unwrap())
            .unwrap();
        assert_eq!(receipt.channel, "phone");
    }

    #[test]
    fn test_router_without_channel() {
        let router = NotifierRouter::new()
            .with(Recording { kind: "email", sent: RefCell::new(Vec::new()) });

        let err = router
            .send(&report(1), &Recipient::phone("+4915112345678").unwrap())
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Unsupported(ref kind) if kind == "phone"));
    }
}
