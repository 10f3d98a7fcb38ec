// src/core/analysis/spectral.rs
//
// Single-window power spectrum estimate, taken a quarter of the way into
// the track to skip leading silence and fades.

use crate::core::decoder::SampleBuffer;
use crate::core::dsp::{apply_hamming, prev_power_of_two, FftProcessor};
use crate::error::{CheckError, Result};

/// Preferred analysis window length in samples
pub const DEFAULT_WINDOW_SIZE: usize = 8192;

/// Power per bin for the lower half of one FFT window.
///
/// Bin `i` sits at `i * frequency_resolution()` Hz.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    bins: Vec<f64>,
    sample_rate: u32,
}

impl PowerSpectrum {
    /// # Panics
    ///
    /// Panics if `sample_rate` is zero.
    pub fn new(bins: Vec<f64>, sample_rate: u32) -> Self {
        assert!(sample_rate > 0, "sample rate must be positive");
        Self { bins, sample_rate }
    }

    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length of the window that produced this spectrum
    pub fn window_size(&self) -> usize {
        self.bins.len() * 2
    }

    /// Hz per bin: `rate / (2 * bins)`, i.e. `rate / window`.
    pub fn frequency_resolution(&self) -> f64 {
        self.sample_rate as f64 / self.window_size() as f64
    }

    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }
}

/// Window length used for a signal of `len` samples: the preferred size if
/// the signal is long enough, otherwise the largest power of two that fits.
pub fn window_size_for(len: usize, preferred: usize) -> usize {
    if len >= preferred {
        preferred
    } else {
        prev_power_of_two(len)
    }
}

/// Start index of the analysis window: a quarter of the way in, pulled back
/// so the window ends at the buffer end if it would overrun.
pub fn window_start(len: usize, window: usize) -> usize {
    let start = len / 4;
    if start + window > len {
        len.saturating_sub(window)
    } else {
        start
    }
}

/// Takes one Hamming-windowed slice of the signal and returns its power
/// spectrum.
///
/// Owns its FFT planner, so one estimator per worker.
pub struct SpectralEstimator {
    window_size: usize,
    fft: FftProcessor,
}

impl SpectralEstimator {
    pub fn new() -> Self {
        Self::with_window_size(DEFAULT_WINDOW_SIZE)
    }

    /// # Panics
    ///
    /// Panics unless `window_size` is a power of two of at least 2.
    pub fn with_window_size(window_size: usize) -> Self {
        assert!(
            window_size >= 2 && window_size.is_power_of_two(),
            "window size must be a power of two >= 2, got {}",
            window_size
        );
        Self {
            window_size,
            fft: FftProcessor::new(),
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Estimate the spectrum of a mono signal.
    ///
    /// # Panics
    ///
    /// Panics if `sample_rate` is zero.
    pub fn estimate(&mut self, samples: &[f64], sample_rate: u32) -> Result<PowerSpectrum> {
        assert!(sample_rate > 0, "sample rate must be positive");

        match samples.len() {
            0 => return Err(CheckError::EmptyInput),
            1 => return Err(CheckError::TooFewSamples { len: 1 }),
            _ => {}
        }

        let window = window_size_for(samples.len(), self.window_size);
        let start = window_start(samples.len(), window);
        let frame = apply_hamming(&samples[start..start + window]);

        let bins = self.fft.power_spectrum(&frame)?;
        let spectrum = PowerSpectrum::new(bins, sample_rate);

        log::debug!(
            "Spectrum: {} samples, window {} at {}, {} bins, {:.2} Hz/bin",
            samples.len(),
            window,
            start,
            spectrum.len(),
            spectrum.frequency_resolution()
        );

        Ok(spectrum)
    }

    /// Estimate from a decoded buffer, mixing channels down first
    pub fn estimate_buffer(&mut self, buffer: &SampleBuffer) -> Result<PowerSpectrum> {
        self.estimate(&buffer.mixdown(), buffer.sample_rate())
    }
}

impl Default for SpectralEstimator {
    fn default() -> Self {
        Self::new()
    }
}
