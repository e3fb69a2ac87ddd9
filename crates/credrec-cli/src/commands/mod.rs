//! CLI subcommands.

pub mod compare;
pub mod config;
pub mod diff;
pub mod preview;
pub mod send;
pub mod sort;

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use credrec_core::delivery::Recipient;
use credrec_core::io::read_table_from_path;
use credrec_core::{CredrecConfig, Notifier, Report, Table};
use tracing::{debug, info};

use crate::delivery::build_router;

pub(crate) fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("credrec")
        .join("config.json")
}

/// Explicit `--config` path, else the user config file if present, else defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<CredrecConfig> {
    if let Some(path) = config_path {
        return Ok(CredrecConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(CredrecConfig::from_file(&default_path)?)
    } else {
        Ok(CredrecConfig::default())
    }
}

pub(crate) fn load_table(path: &Path) -> anyhow::Result<Table> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    let table = read_table_from_path(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    info!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Output directory, created if needed; the working directory by default.
pub(crate) fn output_dir(dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Recipients from `--email` / `--phone`, validated before any work is done.
pub(crate) fn recipients(email: Option<&str>, phone: Option<&str>) -> anyhow::Result<Vec<Recipient>> {
    let mut recipients = Vec::new();
    if let Some(address) = email {
        recipients.push(Recipient::email(address)?);
    }
    if let Some(number) = phone {
        recipients.push(Recipient::phone(number)?);
    }
    Ok(recipients)
}

/// Send the report to every recipient. Failures are reported per recipient.
pub(crate) fn deliver(
    report: &Report,
    recipients: &[Recipient],
    config: &CredrecConfig,
    dry_run: bool,
) -> anyhow::Result<()> {
    if recipients.is_empty() {
        return Ok(());
    }

    let router = build_router(config, dry_run)?;
    let mut failures = 0;
    for recipient in recipients {
        match router.send(report, recipient) {
            Ok(receipt) => {
                let via = receipt
                    .reference
                    .map(|r| format!(" ({})", r))
                    .unwrap_or_default();
                println!(
                    "{} Report sent to {} via {}{}",
                    style("✓").green(),
                    recipient,
                    receipt.channel,
                    via
                );
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} Delivery failed for {}: {}", style("✗").red(), recipient, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("Delivery failed for {} of {} recipients", failures, recipients.len());
    }
    Ok(())
}
