//! Compare command - report the words unique to each of two global records.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use pagefreq_core::analysis::{Comparison, ComparisonRow, compare};
use pagefreq_core::store::read_global;

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// First global record
    #[arg(required = true)]
    first: PathBuf,

    /// Second global record
    #[arg(required = true)]
    second: PathBuf,

    /// Number of entries per report section
    #[arg(long, default_value = "100")]
    top: usize,

    /// Also write the report as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,
}

pub fn run(args: CompareArgs) -> anyhow::Result<()> {
    for path in [&args.first, &args.second] {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
    }

    let a = read_global(&args.first)?;
    let b = read_global(&args.second)?;

    let comparison = compare(&a, &b, args.top);

    println!(
        "Total word count: {} (file 1), {} (file 2)",
        comparison.total_a, comparison.total_b
    );
    print_section(
        &format!("Words unique to {}", args.first.display()),
        &comparison.unique_to_a,
    );
    print_section(
        &format!("Words unique to {}", args.second.display()),
        &comparison.unique_to_b,
    );

    if let Some(csv_path) = &args.csv {
        write_csv(csv_path, &comparison)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            csv_path.display()
        );
    }

    Ok(())
}

fn print_section(title: &str, rows: &[ComparisonRow]) {
    println!();
    println!("{title}");
    println!("Word\tRelative Frequency (%)\tGrouped");
    for row in rows {
        println!(
            "{}\t{:.2}\t{}",
            row.token,
            row.relative_pct,
            row.grouped.join(", ")
        );
    }
}

fn write_csv(path: &Path, comparison: &Comparison) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let total_a = format!("{} (File 1)", comparison.total_a);
    let total_b = format!("{} (File 2)", comparison.total_b);
    wtr.write_record(["Total Word Count", total_a.as_str(), total_b.as_str(), ""])?;
    wtr.write_record(["Section", "Word", "Relative Frequency (%)", "Grouped"])?;

    for (section, rows) in [
        ("unique_to_first", &comparison.unique_to_a),
        ("unique_to_second", &comparison.unique_to_b),
    ] {
        for row in rows {
            let pct = format!("{:.2}", row.relative_pct);
            let grouped = row.grouped.join(", ");
            wtr.write_record([section, row.token.as_str(), pct.as_str(), grouped.as_str()])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
