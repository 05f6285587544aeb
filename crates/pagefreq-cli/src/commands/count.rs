//! Count command - stage 1: extract pages, normalize, count, and write the
//! per-page record.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use pagefreq_core::freq::count_tokens;
use pagefreq_core::normalize::{Normalizer, StopwordSet};
use pagefreq_core::pdf::{PageSource, PdfExtractor};
use pagefreq_core::store::PageRecordWriter;

use super::load_config;

/// Arguments for the count command.
#[derive(Args)]
pub struct CountArgs {
    /// Input PDF document
    #[arg(required = true)]
    input: PathBuf,

    /// Per-page record output path
    #[arg(short, long, default_value = "pages.txt")]
    output: PathBuf,
}

pub fn run(args: CountArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("processing document: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    let page_count = extractor.page_count();
    debug!("PDF has {} pages", page_count);

    let stopwords = match &config.counting.stopword_file {
        Some(path) => StopwordSet::from_file(path)?,
        None => StopwordSet::english(),
    };
    let normalizer = Normalizer::new(stopwords).with_min_token_len(config.counting.min_token_len);

    let mut writer = PageRecordWriter::with_origin(&args.output, config.counting.page_origin)?;

    let pb = ProgressBar::new(u64::from(page_count));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pages")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut written = 0usize;
    let mut total_tokens = 0u64;

    // One page's counts in memory at a time; each map is dropped as soon as
    // its block is on disk.
    for (page, text) in extractor.pages()? {
        if config.extraction.max_pages > 0 && written >= config.extraction.max_pages {
            debug!("page limit reached, stopping before page {}", page);
            break;
        }

        let tokens = normalizer.normalize(&text);
        if tokens.is_empty() && config.extraction.skip_empty_pages {
            debug!("skipping empty page {}", page);
            pb.inc(1);
            continue;
        }

        total_tokens += tokens.len() as u64;
        let freq = count_tokens(tokens);
        let index = page - 1 + config.counting.page_origin;
        writer.write_page(index, &freq)?;

        written += 1;
        pb.inc(1);
    }

    writer.finish()?;
    pb.finish_and_clear();

    println!(
        "{} {} pages, {} words counted, record written to {}",
        style("✓").green(),
        written,
        total_tokens,
        args.output.display()
    );

    debug!("total processing time: {:?}", start.elapsed());

    Ok(())
}
