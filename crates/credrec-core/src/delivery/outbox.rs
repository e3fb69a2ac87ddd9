//! Local outbox channel.
//!
//! Writes what would have been sent into a directory instead of calling a
//! provider. Email recipients get the CSV attachment, phone recipients get
//! the text preview.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::{report_attachment, text_preview, DeliveryReceipt, Notifier, Recipient, Result};
use crate::error::DeliveryError;
use crate::models::report::Report;

/// Notifier that stores messages as files.
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    dir: PathBuf,
    preview_rows: usize,
}

impl OutboxNotifier {
    pub fn new(dir: impl Into<PathBuf>, preview_rows: usize) -> Self {
        Self {
            dir: dir.into(),
            preview_rows,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn message_path(&self, recipient: &Recipient, extension: &str) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%3f");
        self.dir.join(format!(
            "{}_{}_{}.{}",
            stamp,
            recipient.kind(),
            sanitize(recipient.address()),
            extension
        ))
    }
}

impl Notifier for OutboxNotifier {
    fn name(&self) -> &str {
        "outbox"
    }

    fn supports(&self, _recipient: &Recipient) -> bool {
        true
    }

    fn send(&self, report: &Report, recipient: &Recipient) -> Result<DeliveryReceipt> {
        fs::create_dir_all(&self.dir).map_err(|e| DeliveryError::provider("outbox", e))?;

        let (path, bytes) = match recipient {
            Recipient::Email(_) => {
                let attachment = report_attachment(report)?;
                (self.message_path(recipient, "csv"), attachment.bytes)
            }
            Recipient::Phone(_) => (
                self.message_path(recipient, "txt"),
                text_preview(report, self.preview_rows).into_bytes(),
            ),
        };

        fs::write(&path, bytes).map_err(|e| DeliveryError::provider("outbox", e))?;
        tracing::debug!("Wrote outbox message {}", path.display());

        Ok(DeliveryReceipt::new(
            self.name(),
            recipient,
            Some(path.display().to_string()),
        ))
    }
}

fn sanitize(address: &str) -> String {
    address
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect()
}
