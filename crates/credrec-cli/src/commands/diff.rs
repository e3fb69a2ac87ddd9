//! Diff command - column-intersection comparison.

use std::path::PathBuf;

use clap::Args;
use console::style;

use credrec_core::io::{write_table_to_path, REPORT_FILE};
use credrec_core::reconcile::common_columns;
use credrec_core::{CredrecError, ReconcileError};

use super::{load_table, output_dir};

/// Arguments for the diff command.
#[derive(Args)]
pub struct DiffArgs {
    /// Base CSV file
    base: PathBuf,

    /// Comparer CSV file
    comparer: PathBuf,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

pub fn run(args: DiffArgs) -> anyhow::Result<()> {

    let base = load_table(&args.base)?;
    let comparer = load_table(&args.comparer)?;

    let missing = match credrec_core::diff(&base, &comparer) {
        Ok(table) => table,
        Err(CredrecError::Reconcile(ReconcileError::NoCommonColumns)) => {
            anyhow::bail!(
                "No common columns found between {} and {}, cannot compare",
                args.base.display(),
                args.comparer.display()
            );
        }
        Err(e) => return Err(e.into()),
    };

    let dir = output_dir(args.output_dir.as_deref())?;
    let output_path = dir.join(REPORT_FILE);
    write_table_to_path(&missing, &output_path)?;

    println!(
        "{} Compared on columns: {}",
        style("ℹ").blue(),
        common_columns(&base, &comparer).join(", ")
    );
    println!(
        "{} {} comparer rows missing from base, written to {}",
        style("✓").green(),
        style(missing.len()).yellow(),
        output_path.display()
    );

    Ok(())
}
