//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

use crate::config::{default_concurrency, CheckerConfig, DEFAULT_CUTOFF_HZ};

/// Detect fake lossless audio (lossy sources re-encoded as WAV/FLAC)
#[derive(Parser, Debug, Clone)]
#[command(name = "losscheckr", version)]
#[command(about = "Detect fake lossless audio files by spectral analysis")]
pub struct Args {
    /// Audio file or directory to scan recursively
    pub path: PathBuf,

    /// Only print paths of FAKE files
    #[arg(short, long)]
    pub quiet: bool,

    /// Only report FAKE files
    #[arg(long)]
    pub only_fake: bool,

    /// Emit one JSON object per file
    #[arg(long)]
    pub json: bool,

    /// Files whose max effective frequency is below this are FAKE (Hz)
    #[arg(
        long,
        value_name = "HZ",
        env = "LOSSCHECKR_CUTOFF",
        default_value_t = DEFAULT_CUTOFF_HZ
    )]
    pub cutoff: f64,

    /// Number of files analyzed in parallel
    #[arg(
        short = 'j',
        long,
        value_name = "N",
        env = "LOSSCHECKR_JOBS",
        default_value_t = default_concurrency()
    )]
    pub concurrency: usize,
}

impl Args {
    pub fn to_config(&self) -> CheckerConfig {
        CheckerConfig::builder()
            .cutoff_hz(self.cutoff)
            .concurrency(self.concurrency)
            .quiet(self.quiet)
            .only_fake(self.only_fake)
            .json(self.json)
            .build()
    }
}
