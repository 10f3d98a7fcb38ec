//! losscheckr - Detect fake lossless audio files
//!
//! A "lossless" WAV or FLAC made by re-encoding an MP3 keeps the lowpass the
//! lossy encoder applied. losscheckr takes one Hamming-windowed FFT a quarter
//! of the way into each track and looks for that missing top end.
//!
//! ## Module Structure
//!
//! - `core` - Decoders, DSP, spectral estimation, classification, batch scheduler
//! - `cli` - Command-line interface
//! - `config` - Run configuration
//! - `detection` - Per-file result records
//! - `error` - Error types
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use losscheckr::config::CheckerConfig;
//! use losscheckr::core::{BatchScheduler, DecoderRegistry, FileAnalyzer};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let config = CheckerConfig::builder().cutoff_hz(19000.0).concurrency(4).build();
//! let analyzer = FileAnalyzer::new(Arc::new(DecoderRegistry::with_defaults()), &config);
//! let scheduler = BatchScheduler::from_config(analyzer, &config);
//!
//! for result in scheduler.spawn(vec![PathBuf::from("album/01.flac")])? {
//!     println!("{} {}", result.status, result.file_path.display());
//! }
//! # Ok::<(), rayon::ThreadPoolBuildError>(())
//! ```
//!
//! ## Classification rules
//!
//! | Rule | Condition                                         | Verdict |
//! |------|---------------------------------------------------|---------|
//! | 1    | Effective frequency within 500 Hz of an MP3 cutoff | FAKE    |
//! | 2    | Effective frequency below 18 kHz                  | FAKE    |
//! | 3    | Energy cutoff below 90% of Nyquist                | FAKE    |
//! | -    | Effective frequency below the configured cutoff   | FAKE    |
//! | -    | Otherwise                                         | OK      |

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Run configuration
pub mod config;

// Result types
pub mod detection;

pub mod error;

pub use self::config::{CheckerConfig, OutputMode};
pub use self::core::{
    BatchScheduler, ClassificationVerdict, DecoderRegistry, FakeLosslessClassifier,
    FileAnalyzer, PowerSpectrum, SampleBuffer, SpectralEstimator,
};
pub use detection::{AnalysisDetails, AnalysisResult, BatchSummary, Status};
pub use error::{CheckError, Result};
