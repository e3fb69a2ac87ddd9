//! CLI application for credit memo reconciliation.

mod commands;
mod delivery;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{compare, config, diff, preview, send, sort};

/// Credit memo reconciler - find credit memos missing between two CSV exports
#[derive(Parser)]
#[command(name = "credrec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report credit memos missing from either file
    Compare(compare::CompareArgs),

    /// List comparer rows missing from base, compared on shared columns
    Diff(diff::DiffArgs),

    /// Write normalized, sorted copies of both files
    Sort(sort::SortArgs),

    /// Print the first rows of a CSV file
    Preview(preview::PreviewArgs),

    /// Deliver an existing report by email or text message
    Send(send::SendArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Compare(args) => compare::run(args, config_path),
        Commands::Diff(args) => diff::run(args),
        Commands::Sort(args) => sort::run(args),
        Commands::Preview(args) => preview::run(args, config_path),
        Commands::Send(args) => send::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
