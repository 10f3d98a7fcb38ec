//! Core analysis: decoding, DSP, classification and batch scheduling

pub mod analysis;
pub mod analyzer;
pub mod decoder;
pub mod dsp;
pub mod scheduler;

pub use analysis::{ClassificationVerdict, FakeLosslessClassifier, PowerSpectrum, SpectralEstimator};
pub use analyzer::{AnalyzerBuilder, FileAnalyzer};
pub use decoder::{AudioDecoder, AudioMetadata, DecodedAudio, DecoderRegistry, SampleBuffer};
pub use scheduler::{BatchScheduler, ResultStream};
