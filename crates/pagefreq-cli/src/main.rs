//! CLI application for per-page word frequency analysis of PDF documents.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{aggregate, compare, count, top};

/// pagefreq - Count word frequencies in PDF documents, page by page
#[derive(Parser)]
#[command(name = "pagefreq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count word frequencies per page into a per-page record
    Count(count::CountArgs),

    /// Aggregate a per-page record into a global record
    Aggregate(aggregate::AggregateArgs),

    /// Show the most frequent words of a global record
    Top(top::TopArgs),

    /// Compare two global records
    Compare(compare::CompareArgs),
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
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Count(args) => count::run(args, cli.config.as_deref()),
        Commands::Aggregate(args) => aggregate::run(args),
        Commands::Top(args) => top::run(args),
        Commands::Compare(args) => compare::run(args),
    }
}
