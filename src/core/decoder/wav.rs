// src/core/decoder/wav.rs
//
// RIFF/WAVE decoding through hound.

use hound::{SampleFormat, WavReader};
use std::path::Path;

use super::{format_duration, AudioDecoder, AudioMetadata, DecodedAudio, SampleBuffer};
use crate::error::{CheckError, Result};

/// WAV decoder. Integer PCM is scaled by `2^(bits-1)`, float PCM passes
/// through. WAV carries no tags we read, so metadata is only the duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl AudioDecoder for WavDecoder {
    fn name(&self) -> &'static str {
        "WAV"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["wav", "wave"]
    }

    fn decode(&self, path: &Path) -> Result<DecodedAudio> {
        let mut reader = WavReader::open(path).map_err(|e| CheckError::decode(path, e))?;
        let spec = reader.spec();

        if spec.sample_rate == 0 {
            return Err(CheckError::decode(path, "header reports 0 Hz sample rate"));
        }
        if spec.channels == 0 {
            return Err(CheckError::decode(path, "header reports 0 audio channels"));
        }

        let samples: Vec<f64> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<std::result::Result<_, _>>(),
            SampleFormat::Int => {
                let full_scale = (1u64 << (spec.bits_per_sample.max(1) - 1)) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / full_scale))
                    .collect::<std::result::Result<_, _>>()
            }
        }
        .map_err(|e| CheckError::sample_read(path, e))?;

        let buffer = SampleBuffer::new(
            samples,
            spec.sample_rate,
            u32::from(spec.bits_per_sample),
            usize::from(spec.channels),
        );

        log::debug!(
            "WAV {}: {} Hz, {}-bit, {} ch, {} samples",
            path.display(),
            buffer.sample_rate(),
            buffer.bit_depth(),
            buffer.channels(),
            buffer.len()
        );

        let metadata = AudioMetadata {
            duration: Some(format_duration(buffer.duration_secs())),
            ..AudioMetadata::default()
        };

        Ok(DecodedAudio {
            format: self.name().to_string(),
            buffer,
            metadata,
        })
    }
}
