//! Preview command - print the first rows of a CSV file.

use std::path::PathBuf;

use clap::Args;

use credrec_core::io::render_preview;

use super::{load_config, load_table};

/// Arguments for the preview command.
#[derive(Args)]
pub struct PreviewArgs {
    /// CSV file to preview
    file: PathBuf,

    /// Number of rows to show (default from config)
    #[arg(short = 'n', long)]
    rows: Option<usize>,
}

pub fn run(args: PreviewArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let table = load_table(&args.file)?;

    let rows = args.rows.unwrap_or(config.report.preview_rows);
    print!("{}", render_preview(&table, rows));

    Ok(())
}
