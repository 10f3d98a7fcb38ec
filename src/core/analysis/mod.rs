//! Audio analysis algorithms
//!
//! - Spectral estimation (one Hamming-windowed FFT per track)
//! - Fake-lossless classification over that spectrum

mod classifier;
mod spectral;

pub use classifier::{
    detect_cutoff, max_effective_frequency, noise_floor, ClassificationVerdict,
    CodecSignature, FakeLosslessClassifier, VerdictReason, CODEC_SIGNATURES,
    LOW_CEILING_HZ, SIGNATURE_TOLERANCE_HZ,
};
pub use spectral::{
    window_size_for, window_start, PowerSpectrum, SpectralEstimator, DEFAULT_WINDOW_SIZE,
};
