// src/core/analyzer.rs
//
// One file in, one result out: decode, mix down, estimate, classify.

use std::path::Path;
use std::sync::Arc;

use super::analysis::{FakeLosslessClassifier, SpectralEstimator, DEFAULT_WINDOW_SIZE};
use super::decoder::{AudioMetadata, DecoderRegistry, SampleBuffer};
use crate::config::{CheckerConfig, DEFAULT_CUTOFF_HZ};
use crate::detection::{AnalysisDetails, AnalysisResult};
use crate::error::Result;

/// Builder for configuring a [`FileAnalyzer`]
pub struct AnalyzerBuilder {
    registry: Option<Arc<DecoderRegistry>>,
    cutoff_hz: f64,
    window_size: usize,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    pub fn registry(mut self, registry: Arc<DecoderRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn cutoff_hz(mut self, hz: f64) -> Self {
        self.cutoff_hz = hz;
        self
    }

    /// Must be a power of two; see [`SpectralEstimator::with_window_size`].
    pub fn window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    pub fn build(self) -> FileAnalyzer {
        FileAnalyzer {
            registry: self
                .registry
                .unwrap_or_else(|| Arc::new(DecoderRegistry::with_defaults())),
            classifier: FakeLosslessClassifier::new(self.cutoff_hz),
            window_size: self.window_size,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-file analysis job. Shared read-only across workers.
#[derive(Debug, Clone)]
pub struct FileAnalyzer {
    registry: Arc<DecoderRegistry>,
    classifier: FakeLosslessClassifier,
    window_size: usize,
}

impl FileAnalyzer {
    pub fn new(registry: Arc<DecoderRegistry>, config: &CheckerConfig) -> Self {
        Self::builder()
            .registry(registry)
            .cutoff_hz(config.cutoff_hz)
            .build()
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    pub fn classifier(&self) -> &FakeLosslessClassifier {
        &self.classifier
    }

    /// Analyze one file. Never fails: problems become an ERROR result.
    pub fn analyze(&self, path: &Path) -> AnalysisResult {
        let decoder = match self.registry.decoder_for(path) {
            Ok(decoder) => decoder,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                return AnalysisResult::failed(path, "", AudioMetadata::default(), &e);
            }
        };

        let decoded = match decoder.decode(path) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!("{}", e);
                return AnalysisResult::failed(path, decoder.name(), AudioMetadata::default(), &e);
            }
        };

        match self.analyze_buffer(&decoded.buffer) {
            Ok(details) => {
                log::debug!(
                    "{}: {} ({})",
                    path.display(),
                    if details.is_fake { "FAKE" } else { "OK" },
                    details.details
                );
                AnalysisResult::completed(path, decoded.format, decoded.metadata, details)
            }
            Err(e) => {
                log::warn!("Analysis of {} failed: {}", path.display(), e);
                AnalysisResult::failed(path, decoded.format, decoded.metadata, &e)
            }
        }
    }

    /// Spectrum and verdict for already-decoded audio
    pub fn analyze_buffer(&self, buffer: &SampleBuffer) -> Result<AnalysisDetails> {
        let mut estimator = SpectralEstimator::with_window_size(self.window_size);
        let spectrum = estimator.estimate_buffer(buffer)?;
        let verdict = self.classifier.classify(&spectrum);
        Ok(AnalysisDetails::new(verdict, buffer))
    }
}

impl Default for FileAnalyzer {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Status;
    use crate::error::CheckError;
    use std::f64::consts::PI;

    fn tone(freq: f64, rate: u32, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f64 / rate as f64).sin())
            .collect()
    }

    #[test]
    fn test_builder_defaults() {
        let analyzer = FileAnalyzer::default();
        assert_eq!(analyzer.classifier().cutoff_hz(), DEFAULT_CUTOFF_HZ);
        assert!(analyzer.registry().supports(Path::new("x.flac")));
    }

    #[test]
    fn test_config_cutoff_reaches_classifier() {
        let config = CheckerConfig::builder().cutoff_hz(15000.0).build();
        let analyzer = FileAnalyzer::new(Arc::new(DecoderRegistry::with_defaults()), &config);
        assert_eq!(analyzer.classifier().cutoff_hz(), 15000.0);
    }

    #[test]
    fn test_analyze_buffer_reports_stream_properties() {
        let buffer = SampleBuffer::new(
            tone(1000.0, 44100, 20_000)
                .into_iter()
                .flat_map(|s| [s, s])
                .collect(),
            44100,
            24,
            2,
        );

        let details = FileAnalyzer::default().analyze_buffer(&buffer).unwrap();
        assert_eq!(details.sample_rate, 44100);
        assert_eq!(details.bit_depth, 24);
        assert_eq!(details.channels, 2);
        assert!(!details.details.is_empty());
    }

    #[test]
    fn test_analyze_buffer_empty_is_error() {
        let buffer = SampleBuffer::mono(Vec::new(), 44100);
        assert!(matches!(
            FileAnalyzer::default().analyze_buffer(&buffer),
            Err(CheckError::EmptyInput)
        ));
    }

    #[test]
    fn test_unsupported_file_becomes_error_result() {
        let result = FileAnalyzer::default().analyze(Path::new("song.ogg"));
        assert_eq!(result.status, Status::Error);
        assert_eq!(result.format, "");
        assert!(result.error.unwrap().contains("ogg"));
    }

    #[test]
    fn test_missing_file_keeps_decoder_name() {
        let result = FileAnalyzer::default().analyze(Path::new("/nonexistent/x.wav"));
        assert_eq!(result.status, Status::Error);
        assert_eq!(result.format, "WAV");
    }
}
