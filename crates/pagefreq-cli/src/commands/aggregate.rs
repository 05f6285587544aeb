//! Aggregate command - stage 2: fold the per-page record into a global
//! record.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use pagefreq_core::aggregate::aggregate_record;
use pagefreq_core::store::{PageRecordReader, write_global};

/// Arguments for the aggregate command.
#[derive(Args)]
pub struct AggregateArgs {
    /// Per-page record produced by `pagefreq count`
    #[arg(required = true)]
    input: PathBuf,

    /// Global record output path
    #[arg(short, long, default_value = "global.txt")]
    output: PathBuf,
}

pub fn run(args: AggregateArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("aggregating per-page record: {}", args.input.display());

    let reader = PageRecordReader::open(&args.input)?;
    let global = aggregate_record(reader)?;
    write_global(&args.output, &global)?;

    println!(
        "{} {} distinct words, global record written to {}",
        style("✓").green(),
        global.len(),
        args.output.display()
    );

    debug!("total processing time: {:?}", start.elapsed());

    Ok(())
}
