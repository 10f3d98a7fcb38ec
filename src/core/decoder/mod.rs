// src/core/decoder/mod.rs
//
// Sample sources: a registry mapping lowercase file extensions to decoders
// that turn a container into normalized PCM plus tag metadata.

mod flac;
mod wav;

pub use flac::FlacDecoder;
pub use wav::WavDecoder;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CheckError, Result};

/// Decoded PCM for one file.
///
/// Samples are interleaved across channels and normalized to [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
    bit_depth: u32,
    channels: usize,
}

impl SampleBuffer {
    /// # Panics
    ///
    /// Panics if `sample_rate` or `channels` is zero. Decoders validate
    /// headers before building a buffer, so this is a broken invariant.
    pub fn new(samples: Vec<f64>, sample_rate: u32, bit_depth: u32, channels: usize) -> Self {
        assert!(sample_rate > 0, "sample rate must be positive");
        assert!(channels > 0, "channel count must be positive");
        Self {
            samples,
            sample_rate,
            bit_depth,
            channels,
        }
    }

    /// Single-channel buffer, mostly for synthesized signals
    pub fn mono(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self::new(samples, sample_rate, 32, 1)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total sample count across all channels
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples per channel
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Per-frame channel average; borrows when the buffer is already mono.
    pub fn mixdown(&self) -> Cow<'_, [f64]> {
        if self.channels == 1 {
            return Cow::Borrowed(&self.samples);
        }

        let scale = 1.0 / self.channels as f64;
        Cow::Owned(
            self.samples
                .chunks_exact(self.channels)
                .map(|frame| frame.iter().sum::<f64>() * scale)
                .collect(),
        )
    }
}

/// Textual tags read from the container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Everything a decoder hands back for one file
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Container name for reporting, e.g. "FLAC"
    pub format: String,
    pub buffer: SampleBuffer,
    pub metadata: AudioMetadata,
}

/// A decoder for one family of containers
pub trait AudioDecoder: Send + Sync {
    /// Container name reported in results
    fn name(&self) -> &'static str;

    /// Lowercase extensions (without the dot) this decoder handles
    fn extensions(&self) -> &'static [&'static str];

    /// Fully decode `path`.
    ///
    /// Header/probe problems are `DecodeFailure`; problems after the stream
    /// opened are `SampleReadFailure`.
    fn decode(&self, path: &Path) -> Result<DecodedAudio>;
}

/// Maps lowercase extensions to decoders.
///
/// Adding a format means registering another [`AudioDecoder`]; lookup never
/// changes.
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: HashMap<String, Arc<dyn AudioDecoder>>,
}

impl DecoderRegistry {
    /// Registry with no decoders
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in WAV and FLAC decoders
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(WavDecoder);
        registry.register(FlacDecoder);
        registry
    }

    /// Register a decoder under all of its extensions, replacing any
    /// previous owner of the same extension.
    pub fn register<D: AudioDecoder + 'static>(&mut self, decoder: D) {
        let decoder: Arc<dyn AudioDecoder> = Arc::new(decoder);
        for ext in decoder.extensions() {
            self.decoders.insert(ext.to_ascii_lowercase(), Arc::clone(&decoder));
        }
    }

    pub fn decoder_for(&self, path: &Path) -> Result<&dyn AudioDecoder> {
        let extension = lowercase_extension(path);
        self.decoders
            .get(&extension)
            .map(|d| d.as_ref())
            .ok_or_else(|| CheckError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
    }

    pub fn supports(&self, path: &Path) -> bool {
        self.decoders.contains_key(&lowercase_extension(path))
    }

    pub fn decode(&self, path: &Path) -> Result<DecodedAudio> {
        let decoder = self.decoder_for(path)?;
        log::debug!("Decoding {} with {} decoder", path.display(), decoder.name());
        decoder.decode(path)
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Human duration like `3m25.500s` or `12.000s`
pub fn format_duration(secs: f64) -> String {
    let secs = secs.max(0.0);
    let minutes = (secs / 60.0).floor();
    let rest = secs - minutes * 60.0;
    if minutes >= 1.0 {
        format!("{}m{:.3}s", minutes as u64, rest)
    } else {
        format!("{:.3}s", rest)
    }
}
