// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod collect;
mod output;

pub use args::Args;
pub use collect::collect_audio_files;
pub use output::{format_json, format_result, format_summary, Reporter};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

use crate::config::OutputMode;
use crate::core::{BatchScheduler, DecoderRegistry, FileAnalyzer};
use crate::detection::BatchSummary;

/// Run the CLI: collect files, analyze them in parallel, report as results
/// arrive, then print the summary.
pub fn run(args: Args) -> Result<BatchSummary> {
    let config = args.to_config();
    let registry = Arc::new(DecoderRegistry::with_defaults());

    let files = collect_audio_files(&args.path, &registry)
        .with_context(|| format!("Failed to collect audio files from {}", args.path.display()))?;

    if files.is_empty() {
        println!("No supported audio files found");
        return Ok(BatchSummary::default());
    }

    let analyzer = FileAnalyzer::new(registry, &config);
    let scheduler = BatchScheduler::from_config(analyzer, &config);
    let reporter = Reporter::new(config.output);

    let stream = scheduler
        .spawn(files)
        .context("Failed to start worker pool")?;
    let progress = progress_bar(stream.total() as u64, config.output)?;

    let mut summary = BatchSummary::default();
    for result in stream {
        progress.inc(1);
        progress.set_message(result.file_name());
        if let Some(text) = reporter.render(&result) {
            progress.suspend(|| println!("{}", text));
        }
        summary.record(&result);
    }
    progress.finish_and_clear();

    log::info!(
        "Finished: {} files, {} ok, {} fake, {} errors",
        summary.total,
        summary.ok,
        summary.fake,
        summary.errors
    );

    if let Some(text) = reporter.render_summary(&summary) {
        print!("{}", text);
    }

    Ok(summary)
}

fn progress_bar(total: u64, mode: OutputMode) -> Result<ProgressBar> {
    if !mode.shows_progress() {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    Ok(bar)
}
