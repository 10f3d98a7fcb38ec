//! Window function implementations

use std::f64::consts::PI;

/// Symmetric Hamming window: `0.54 - 0.46 cos(2πn / (N-1))`.
///
/// A window of length 1 is the single coefficient 1.0.
pub fn hamming(size: usize) -> Vec<f64> {
    if size == 1 {
        return vec![1.0];
    }
    let denom = (size - 1) as f64;
    (0..size)
        .map(|n| 0.54 - 0.46 * (2.0 * PI * n as f64 / denom).cos())
        .collect()
}

/// Multiply `samples` by a Hamming window of the same length
pub fn apply_hamming(samples: &[f64]) -> Vec<f64> {
    samples
        .iter()
        .zip(hamming(samples.len()))
        .map(|(&s, w)| s * w)
        .collect()
}
