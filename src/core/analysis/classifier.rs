// src/core/analysis/classifier.rs
//
// Fake-lossless heuristic over a single power spectrum. A lossy encoder
// low-passes the signal, so a "lossless" file whose energy stops at a known
// MP3 cutoff, or well short of Nyquist, was most likely transcoded.

use super::spectral::PowerSpectrum;
use crate::config::{CheckerConfig, DEFAULT_CUTOFF_HZ};

/// Lowpass frequency a lossy encoder leaves behind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecSignature {
    pub cutoff_hz: f64,
    pub label: &'static str,
}

/// Checked in this order; the first match wins.
pub const CODEC_SIGNATURES: [CodecSignature; 5] = [
    CodecSignature {
        cutoff_hz: 16000.0,
        label: "MP3 128kbps",
    },
    CodecSignature {
        cutoff_hz: 17000.0,
        label: "MP3 160kbps",
    },
    CodecSignature {
        cutoff_hz: 19000.0,
        label: "MP3 192kbps",
    },
    CodecSignature {
        cutoff_hz: 20000.0,
        label: "MP3 256kbps",
    },
    CodecSignature {
        cutoff_hz: 21000.0,
        label: "MP3 320kbps",
    },
];

/// Max distance between the effective frequency and a signature cutoff
pub const SIGNATURE_TOLERANCE_HZ: f64 = 500.0;

/// Effective frequencies below this are always suspicious
pub const LOW_CEILING_HZ: f64 = 18000.0;

/// A bin counts as content when it is this many times the noise floor
const FLOOR_MULTIPLIER: f64 = 10.0;

/// Drop threshold relative to the strongest bin
const CUTOFF_RATIO: f64 = 0.01;

/// Consecutive below-threshold bins that mark a cutoff
const CUTOFF_RUN: usize = 10;

/// A cutoff below this fraction of Nyquist is premature
const NYQUIST_FRACTION: f64 = 0.9;

/// Which rule decided the verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerdictReason {
    /// Effective frequency within tolerance of a lossy signature
    CodecSignature(&'static str),
    /// Effective frequency under [`LOW_CEILING_HZ`]
    LowEffectiveFrequency,
    /// Energy drops off well before Nyquist
    EarlyCutoff,
    /// Only the configured cutoff flagged the file
    BelowConfiguredCutoff,
    Genuine,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationVerdict {
    pub is_fake: bool,
    pub max_effective_frequency_hz: f64,
    pub cutoff_frequency_hz: f64,
    pub reason: VerdictReason,
    pub explanation: String,
}

/// Mean power of the top 10% of bins
pub fn noise_floor(bins: &[f64]) -> f64 {
    let start = bins.len() * 9 / 10;
    let tail = &bins[start..];
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().sum::<f64>() / tail.len() as f64
}

/// Frequency of the highest bin whose power exceeds `10 * floor`, or 0
pub fn max_effective_frequency(bins: &[f64], resolution: f64) -> f64 {
    let threshold = noise_floor(bins) * FLOOR_MULTIPLIER;
    bins.iter()
        .rposition(|&p| p > threshold)
        .map_or(0.0, |i| i as f64 * resolution)
}

/// Scan down from the top bin for a run of [`CUTOFF_RUN`] bins strictly
/// below 1% of the peak power. Reports `(i + CUTOFF_RUN) * resolution`
/// where `i` is the bin that completes the run, or the top of the spectrum
/// when no run exists.
pub fn detect_cutoff(bins: &[f64], resolution: f64) -> f64 {
    let peak = bins.iter().copied().fold(0.0_f64, f64::max);
    let threshold = peak * CUTOFF_RATIO;

    let mut run = 0;
    for (i, &power) in bins.iter().enumerate().rev() {
        if power < threshold {
            run += 1;
            if run == CUTOFF_RUN {
                return (i + CUTOFF_RUN) as f64 * resolution;
            }
        } else {
            run = 0;
        }
    }

    bins.len() as f64 * resolution
}

fn matching_signature(max_effective: f64) -> Option<&'static CodecSignature> {
    CODEC_SIGNATURES
        .iter()
        .find(|sig| (max_effective - sig.cutoff_hz).abs() < SIGNATURE_TOLERANCE_HZ)
}

/// Decides whether a spectrum looks transcoded from a lossy source.
///
/// Rules, first hit wins: codec signature, effective frequency below
/// 18 kHz, cutoff below 90% of Nyquist. Afterwards the configured cutoff
/// can still flag a file the rules passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeLosslessClassifier {
    cutoff_hz: f64,
}

impl FakeLosslessClassifier {
    pub fn new(cutoff_hz: f64) -> Self {
        Self { cutoff_hz }
    }

    pub fn from_config(config: &CheckerConfig) -> Self {
        Self::new(config.cutoff_hz)
    }

    pub fn cutoff_hz(&self) -> f64 {
        self.cutoff_hz
    }

    /// # Panics
    ///
    /// Panics on an empty spectrum; the estimator never produces one.
    pub fn classify(&self, spectrum: &PowerSpectrum) -> ClassificationVerdict {
        assert!(!spectrum.is_empty(), "cannot classify an empty spectrum");

        let bins = spectrum.bins();
        let resolution = spectrum.frequency_resolution();
        let max_effective = max_effective_frequency(bins, resolution);
        let cutoff = detect_cutoff(bins, resolution);

        log::debug!(
            "Classifier: floor {:.3e}, max effective {:.1} Hz, cutoff {:.1} Hz",
            noise_floor(bins),
            max_effective,
            cutoff
        );

        let (reason, explanation) = if let Some(sig) = matching_signature(max_effective) {
            (
                VerdictReason::CodecSignature(sig.label),
                format!(
                    "Typical {} cutoff detected at {:.0} Hz",
                    sig.label, max_effective
                ),
            )
        } else if max_effective < LOW_CEILING_HZ {
            (
                VerdictReason::LowEffectiveFrequency,
                format!(
                    "Max effective frequency too low ({:.0} Hz), likely a lossy source",
                    max_effective
                ),
            )
        } else if cutoff < spectrum.nyquist() * NYQUIST_FRACTION {
            (
                VerdictReason::EarlyCutoff,
                format!("Abnormal cutoff detected at {:.0} Hz", cutoff),
            )
        } else {
            (
                VerdictReason::Genuine,
                format!(
                    "Spectrum looks normal, max effective frequency {:.0} Hz",
                    max_effective
                ),
            )
        };

        let mut verdict = ClassificationVerdict {
            is_fake: reason != VerdictReason::Genuine,
            max_effective_frequency_hz: max_effective,
            cutoff_frequency_hz: cutoff,
            reason,
            explanation,
        };

        if max_effective < self.cutoff_hz {
            // Keep the more specific explanation when a rule already fired
            if !verdict.is_fake {
                verdict.reason = VerdictReason::BelowConfiguredCutoff;
                verdict.explanation = format!(
                    "Max effective frequency {:.0} Hz is below the configured cutoff of {:.0} Hz",
                    max_effective, self.cutoff_hz
                );
            }
            verdict.is_fake = true;
        }

        verdict
    }
}

impl Default for FakeLosslessClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF_HZ)
    }
}
