//! Error types for per-file analysis

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures that turn a single file's analysis into an ERROR result.
///
/// None of these abort a batch; the scheduler converts them into
/// [`AnalysisResult::failed`](crate::detection::AnalysisResult::failed).
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("sample sequence is empty")]
    EmptyInput,

    #[error("need at least 2 samples for a spectrum, got {len}")]
    TooFewSamples { len: usize },

    #[error("failed to decode {}: {reason}", path.display())]
    DecodeFailure { path: PathBuf, reason: String },

    #[error("failed to read samples from {}: {reason}", path.display())]
    SampleReadFailure { path: PathBuf, reason: String },

    #[error("unsupported audio format '{extension}': {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("FFT error: {0}")]
    Fft(String),

    #[error("analysis of {} panicked: {message}", path.display())]
    Panicked { path: PathBuf, message: String },
}

impl CheckError {
    pub fn decode(path: &Path, reason: impl ToString) -> Self {
        CheckError::DecodeFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn sample_read(path: &Path, reason: impl ToString) -> Self {
        CheckError::SampleReadFailure {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

impl From<realfft::FftError> for CheckError {
    fn from(err: realfft::FftError) -> Self {
        CheckError::Fft(err.to_string())
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, CheckError>;
