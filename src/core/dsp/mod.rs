//! Digital Signal Processing utilities

mod fft;
mod windows;

pub use fft::FftProcessor;
pub use windows::{apply_hamming, hamming};

/// Largest power of two that is `<= n`. `n` must be non-zero.
pub fn prev_power_of_two(n: usize) -> usize {
    debug_assert!(n > 0);
    1 << (usize::BITS - 1 - n.leading_zeros())
}
