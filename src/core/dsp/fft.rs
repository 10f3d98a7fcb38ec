//! Real-input FFT returning the non-redundant power spectrum

use realfft::RealFftPlanner;

use crate::error::Result;

/// Forward real FFT with a cached planner. Each worker owns its own.
pub struct FftProcessor {
    planner: RealFftPlanner<f64>,
}

impl FftProcessor {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
        }
    }

    /// `|X[k]|²` for `k` in `0..N/2`, unnormalized.
    ///
    /// The Nyquist coefficient the real transform also produces is dropped
    /// so the result has exactly `N/2` bins.
    pub fn power_spectrum(&mut self, frame: &[f64]) -> Result<Vec<f64>> {
        let n = frame.len();
        let r2c = self.planner.plan_fft_forward(n);

        let mut input = frame.to_vec();
        let mut output = r2c.make_output_vec();
        r2c.process(&mut input, &mut output)?;

        Ok(output[..n / 2].iter().map(|c| c.norm_sqr()).collect())
    }
}

impl Default for FftProcessor {
    fn default() -> Self {
        Self::new()
    }
}
