//! Configuration structures for reports and delivery.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for credrec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredrecConfig {
    /// Report export and preview configuration.
    pub report: ReportConfig,

    /// Delivery channel configuration.
    pub delivery: DeliveryConfig,
}

/// Preview sizes. Export file names are fixed, see [`crate::io::REPORT_FILE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows shown when previewing an input table.
    pub preview_rows: usize,

    /// Rows included in an inline text message.
    pub message_preview_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_rows: 20,
            message_preview_rows: 10,
        }
    }
}

/// Delivery channels. Secrets are never stored here, only the names of the
/// environment variables holding them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Subject line for emailed reports.
    pub subject: String,

    /// Email provider, if configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailProviderConfig>,

    /// SMS/chat provider, if configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms: Option<SmsProviderConfig>,

    /// Directory that receives messages in dry-run mode.
    pub outbox_dir: PathBuf,

    /// HTTP timeout for provider calls, in seconds.
    pub timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            subject: "Missing Credit Report".to_string(),
            email: None,
            sms: None,
            outbox_dir: PathBuf::from("outbox"),
            timeout_secs: 15,
        }
    }
}

/// HTTP mail API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailProviderConfig {
    /// Endpoint accepting a JSON message with attachments.
    pub endpoint: String,

    /// Sender address.
    pub from: String,

    /// Environment variable holding the bearer token.
    #[serde(default = "default_email_key_env")]
    pub api_key_env: String,
}

fn default_email_key_env() -> String {
    "CREDREC_EMAIL_API_KEY".to_string()
}

/// Form-encoded messaging API settings (Twilio-style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsProviderConfig {
    /// Endpoint accepting `To`, `From` and `Body` form fields.
    pub endpoint: String,

    /// Sender number.
    pub from: String,

    /// Environment variable holding the account identifier (basic-auth user).
    #[serde(default = "default_sms_account_env")]
    pub account_sid_env: String,

    /// Environment variable holding the auth token (basic-auth password).
    #[serde(default = "default_sms_token_env")]
    pub auth_token_env: String,
}

fn default_sms_account_env() -> String {
    "CREDREC_SMS_ACCOUNT_SID".to_string()
}

fn default_sms_token_env() -> String {
    "CREDREC_SMS_AUTH_TOKEN".to_string()
}

impl CredrecConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
