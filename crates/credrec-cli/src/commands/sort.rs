//! Sort command - normalize and order both files for side-by-side review.

use std::path::PathBuf;

use clap::Args;
use console::style;

use credrec_core::io::{write_table_to_path, SORTED_BASE_FILE, SORTED_COMPARER_FILE};
use credrec_core::{normalize, sort};

use super::{load_table, output_dir};

/// Arguments for the sort command.
#[derive(Args)]
pub struct SortArgs {
    /// Base CSV file
    base: PathBuf,

    /// Comparer CSV file
    comparer: PathBuf,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

pub fn run(args: SortArgs) -> anyhow::Result<()> {
    let dir = output_dir(args.output_dir.as_deref())?;

    let outputs = [
        (&args.base, SORTED_BASE_FILE),
        (&args.comparer, SORTED_COMPARER_FILE),
    ];

    for (input, file_name) in outputs {
        let table = load_table(input)?;
        let sorted = sort(&normalize(&table)?);

        let output_path = dir.join(file_name);
        write_table_to_path(&sorted.to_table(), &output_path)?;

        println!(
            "{} Sorted {} rows from {} into {}",
            style("✓").green(),
            sorted.len(),
            input.display(),
            output_path.display()
        );
    }

    Ok(())
}
