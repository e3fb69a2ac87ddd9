//! Compare command - find credit memos missing from either file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use credrec_core::io::{render_preview, REPORT_FILE};
use credrec_core::{Report, Session, Table};

use super::{deliver, load_config, load_table, output_dir, recipients};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Base CSV file
    base: PathBuf,

    /// Comparer CSV file
    comparer: PathBuf,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ReportFormat,

    /// Print a preview of both input files first
    #[arg(long)]
    preview: bool,

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

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// CSV report
    Csv,
    /// JSON array of report rows
    Json,
    /// Aligned text table
    Text,
}

pub fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let recipients = recipients(args.email.as_deref(), args.phone.as_deref())?;

    let base = load_table(&args.base)?;
    let comparer = load_table(&args.comparer)?;

    if args.preview {
        print_preview("Base", &args.base, &base, config.report.preview_rows);
        print_preview("Comparer", &args.comparer, &comparer, config.report.preview_rows);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Comparing...");

    let mut session = Session::new();
    let result = session.report(&base, &comparer);
    pb.finish_and_clear();
    let report = result?;

    let dir = output_dir(args.output_dir.as_deref())?;
    let output_path = write_report(report, &dir, REPORT_FILE, args.format)?;

    let summary = report.summary();
    println!(
        "{} Report written to {}",
        style("✓").green(),
        output_path.display()
    );
    println!(
        "   {} missing in comparer, {} missing in base, {} total",
        style(summary.missing_in_comparer).yellow(),
        style(summary.missing_in_base).yellow(),
        summary.total
    );
    debug!("Compare finished in {:?}", start.elapsed());

    deliver(report, &recipients, &config, args.dry_run)
}

fn print_preview(label: &str, path: &Path, table: &Table, rows: usize) {
    println!(
        "{} {} file {} ({} rows)",
        style("ℹ").blue(),
        label,
        path.display(),
        table.len()
    );
    println!("{}", render_preview(table, rows));
}

/// Write the report in the requested format; returns the written path.
pub(crate) fn write_report(
    report: &Report,
    dir: &Path,
    file_name: &str,
    format: ReportFormat,
) -> anyhow::Result<PathBuf> {
    let path = match format {
        ReportFormat::Csv => dir.join(file_name),
        ReportFormat::Json => dir.join(file_name).with_extension("json"),
        ReportFormat::Text => dir.join(file_name).with_extension("txt"),
    };

    let content = match format {
        ReportFormat::Csv => report.to_csv()?,
        ReportFormat::Json => serde_json::to_string_pretty(report)?,
        ReportFormat::Text => render_preview(&report.to_table(), report.len()),
    };

    fs::write(&path, content)?;
    debug!("Wrote report to {}", path.display());
    Ok(path)
}
