//! Send command - deliver an existing report file.

use std::fs::File;
use std::path::PathBuf;

use clap::Args;
use console::style;

use credrec_core::Report;

use super::{deliver, load_config, recipients};

/// Arguments for the send command.
#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("recipient")
        .required(true)
        .multiple(true)
        .args(["email", "phone"]),
))]
pub struct SendArgs {
    /// Report CSV written by `credrec compare`
    report: PathBuf,

    /// Email the report to this address
    #[arg(long)]
    email: Option<String>,

    /// Text a report preview to this phone number (+ and digits)
    #[arg(long)]
    phone: Option<String>,

    /// Write messages to the outbox directory instead of sending them
    #[arg(long)]
    dry_run: bool,
}

pub fn run(args: SendArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let recipients = recipients(args.email.as_deref(), args.phone.as_deref())?;

    if !args.report.exists() {
        anyhow::bail!("Report file not found: {}", args.report.display());
    }
    let report = Report::read_csv(File::open(&args.report)?)
        .map_err(|e| anyhow::anyhow!("Failed to read report {}: {}", args.report.display(), e))?;

    println!(
        "{} Loaded report with {} rows",
        style("ℹ").blue(),
        report.len()
    );

    deliver(&report, &recipients, &config, args.dry_run)
}
