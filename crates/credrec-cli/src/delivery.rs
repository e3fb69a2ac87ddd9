//! HTTP delivery providers.
//!
//! Secrets are resolved from environment variables named in the config,
//! never stored inline.

use std::time::Duration;

use base64::Engine;
use serde::Serialize;
use tracing::debug;

use credrec_core::delivery::{
    email_body, report_attachment, text_preview, DeliveryReceipt, Notifier, NotifierRouter,
    OutboxNotifier, Recipient, Result,
};
use credrec_core::models::config::{CredrecConfig, EmailProviderConfig, SmsProviderConfig};
use credrec_core::{DeliveryError, Report};

const USER_AGENT: &str = concat!("credrec/", env!("CARGO_PKG_VERSION"));

/// Build the notifier for this run.
///
/// Dry runs write into the configured outbox directory. Otherwise each
/// configured provider is registered; recipients with no provider fail with
/// `DeliveryError::Unsupported`.
pub fn build_router(config: &CredrecConfig, dry_run: bool) -> Result<NotifierRouter> {
    let delivery = &config.delivery;
    if dry_run {
        return Ok(NotifierRouter::new().with(OutboxNotifier::new(
            delivery.outbox_dir.clone(),
            config.report.message_preview_rows,
        )));
    }

    let http = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(delivery.timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DeliveryError::provider("http", e))?;

    let mut router = NotifierRouter::new();
    if let Some(email) = &delivery.email {
        router.push(Box::new(HttpEmailNotifier {
            http: http.clone(),
            config: email.clone(),
            subject: delivery.subject.clone(),
        }));
    }
    if let Some(sms) = &delivery.sms {
        router.push(Box::new(HttpSmsNotifier {
            http,
            config: sms.clone(),
            preview_rows: config.report.message_preview_rows,
        }));
    }
    Ok(router)
}

fn resolve_env(provider: &str, var_name: &str) -> Result<String> {
    let value = std::env::var(var_name).map_err(|_| {
        DeliveryError::provider(provider, format!("environment variable {} not set", var_name))
    })?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(DeliveryError::provider(
            provider,
            format!("environment variable {} is empty", var_name),
        ));
    }
    Ok(value)
}

fn check_status(provider: &str, resp: reqwest::blocking::Response) -> Result<Option<String>> {
    let status = resp.status();
    let body: serde_json::Value = resp.json().unwrap_or(serde_json::Value::Null);
    if !status.is_success() {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(DeliveryError::provider(provider, message));
    }

    // Providers disagree on the id field.
    let id = ["id", "message_id", "sid"]
        .iter()
        .find_map(|k| body.get(*k).and_then(|v| v.as_str()))
        .map(str::to_string);
    Ok(id)
}

#[derive(Serialize)]
struct EmailMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
    attachments: Vec<EmailAttachment>,
}

#[derive(Serialize)]
struct EmailAttachment {
    filename: String,
    content_type: &'static str,
    content: String,
}

/// JSON mail API with bearer authentication.
pub struct HttpEmailNotifier {
    http: reqwest::blocking::Client,
    config: EmailProviderConfig,
    subject: String,
}

impl Notifier for HttpEmailNotifier {
    fn name(&self) -> &str {
        "email"
    }

    fn supports(&self, recipient: &Recipient) -> bool {
        matches!(recipient, Recipient::Email(_))
    }

    fn send(&self, report: &Report, recipient: &Recipient) -> Result<DeliveryReceipt> {
        let api_key = resolve_env(self.name(), &self.config.api_key_env)?;
        let attachment = report_attachment(report)?;

        let message = EmailMessage {
            from: &self.config.from,
            to: recipient.address(),
            subject: &self.subject,
            text: email_body(report),
            attachments: vec![EmailAttachment {
                filename: attachment.file_name,
                content_type: attachment.content_type,
                content: base64::engine::general_purpose::STANDARD.encode(&attachment.bytes),
            }],
        };

        debug!("POST {} ({} report rows)", self.config.endpoint, report.len());
        let resp = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&api_key)
            .json(&message)
            .send()
            .map_err(|e| DeliveryError::provider(self.name(), e))?;

        let id = check_status(self.name(), resp)?;
        Ok(DeliveryReceipt::new(self.name(), recipient, id))
    }
}

/// Form-encoded messaging API with basic authentication.
pub struct HttpSmsNotifier {
    http: reqwest::blocking::Client,
    config: SmsProviderConfig,
    preview_rows: usize,
}

impl Notifier for HttpSmsNotifier {
    fn name(&self) -> &str {
        "sms"
    }

    fn supports(&self, recipient: &Recipient) -> bool {
        matches!(recipient, Recipient::Phone(_))
    }

    fn send(&self, report: &Report, recipient: &Recipient) -> Result<DeliveryReceipt> {
        let account = resolve_env(self.name(), &self.config.account_sid_env)?;
        let token = resolve_env(self.name(), &self.config.auth_token_env)?;
        let body = text_preview(report, self.preview_rows);

        debug!("POST {} ({} chars)", self.config.endpoint, body.len());
        let resp = self
            .http
            .post(&self.config.endpoint)
            .basic_auth(&account, Some(&token))
            .form(&[
                ("To", recipient.address()),
                ("From", self.config.from.as_str()),
                ("Body", body.as_str()),
            ])
            .send()
            .map_err(|e| DeliveryError::provider(self.name(), e))?;

        let id = check_status(self.name(), resp)?;
        Ok(DeliveryReceipt::new(self.name(), recipient, id))
    }
}
