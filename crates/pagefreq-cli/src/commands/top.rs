//! Top command - print the most frequent words of a global record.

use std::path::PathBuf;

use clap::Args;

use pagefreq_core::freq::sorted_entries;
use pagefreq_core::store::read_global;

/// Arguments for the top command.
#[derive(Args)]
pub struct TopArgs {
    /// Global record produced by `pagefreq aggregate`
    #[arg(required = true)]
    input: PathBuf,

    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "10")]
    count: usize,
}

pub fn run(args: TopArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let global = read_global(&args.input)?;

    println!("Word Frequency Count:");
    for (token, count) in sorted_entries(&global).into_iter().take(args.count) {
        println!("{token}: {count}");
    }

    Ok(())
}
