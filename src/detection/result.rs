//! Per-file result records and batch summary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::analysis::ClassificationVerdict;
use crate::core::decoder::{AudioMetadata, SampleBuffer};
use crate::error::CheckError;

/// Outcome of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Looks genuinely lossless
    Ok,
    /// Likely transcoded from a lossy source
    Fake,
    /// Could not be analyzed
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Fake => "FAKE",
            Status::Error => "ERROR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Ok => "✓",
            Status::Fake => "✗",
            Status::Error => "!",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stream properties plus the classifier verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    pub is_fake: bool,
    /// Detected drop-off frequency in Hz
    pub cutoff_hz: f64,
    /// Highest frequency with real content, in Hz
    pub max_frequency: f64,
    /// Human-readable reason for the verdict
    pub details: String,
    pub sample_rate: u32,
    pub bit_depth: u32,
    pub channels: usize,
    /// Seconds
    pub duration: f64,
}

impl AnalysisDetails {
    pub fn new(verdict: ClassificationVerdict, buffer: &SampleBuffer) -> Self {
        Self {
            is_fake: verdict.is_fake,
            cutoff_hz: verdict.cutoff_frequency_hz,
            max_frequency: verdict.max_effective_frequency_hz,
            details: verdict.explanation,
            sample_rate: buffer.sample_rate(),
            bit_depth: buffer.bit_depth(),
            channels: buffer.channels(),
            duration: buffer.duration_secs(),
        }
    }
}

/// One record per input file. Exactly one of `analysis` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub file_path: PathBuf,
    /// Container name, empty when no decoder claimed the file
    pub format: String,
    pub metadata: AudioMetadata,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    pub fn completed(
        path: &Path,
        format: impl Into<String>,
        metadata: AudioMetadata,
        details: AnalysisDetails,
    ) -> Self {
        Self {
            file_path: path.to_path_buf(),
            format: format.into(),
            metadata,
            status: if details.is_fake { Status::Fake } else { Status::Ok },
            analysis: Some(details),
            error: None,
        }
    }

    pub fn failed(
        path: &Path,
        format: impl Into<String>,
        metadata: AudioMetadata,
        error: &CheckError,
    ) -> Self {
        Self {
            file_path: path.to_path_buf(),
            format: format.into(),
            metadata,
            status: Status::Error,
            analysis: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_fake(&self) -> bool {
        self.status == Status::Fake
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }
}

/// Counts by status over a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub ok: usize,
    pub fake: usize,
    pub errors: usize,
}

impl BatchSummary {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a AnalysisResult>,
    {
        results.into_iter().fold(Self::default(), |mut summary, r| {
            summary.record(r);
            summary
        })
    }

    pub fn record(&mut self, result: &AnalysisResult) {
        self.total += 1;
        match result.status {
            Status::Ok => self.ok += 1,
            Status::Fake => self.fake += 1,
            Status::Error => self.errors += 1,
        }
    }
}
