// src/core/decoder/flac.rs
//
// FLAC decoding through Symphonia, including Vorbis comment tags.

use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer as PcmBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, StandardTagKey, Tag};
use symphonia::core::probe::Hint;

use super::{format_duration, AudioDecoder, AudioMetadata, DecodedAudio, SampleBuffer};
use crate::error::{CheckError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct FlacDecoder;

impl AudioDecoder for FlacDecoder {
    fn name(&self) -> &'static str {
        "FLAC"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["flac"]
    }

    fn decode(&self, path: &Path) -> Result<DecodedAudio> {
        let file = File::open(path).map_err(|e| CheckError::decode(path, e))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("flac");

        let mut probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| CheckError::decode(path, e))?;

        let mut metadata = AudioMetadata::default();
        if let Some(revision) = probed.format.metadata().current() {
            apply_tags(&mut metadata, revision.tags());
        }
        // Tags placed ahead of the stream (e.g. ID3) end up on the probe
        if let Some(early) = probed.metadata.get() {
            if let Some(revision) = early.current() {
                apply_tags(&mut metadata, revision.tags());
            }
        }

        let mut format = probed.format;
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| CheckError::decode(path, "no supported audio track found"))?;

        let track_id = track.id;
        let params = track.codec_params.clone();

        let sample_rate = params
            .sample_rate
            .filter(|&rate| rate > 0)
            .ok_or_else(|| CheckError::decode(path, "stream does not specify a sample rate"))?;
        let channels = params
            .channels
            .map(|c| c.count())
            .filter(|&count| count > 0)
            .ok_or_else(|| CheckError::decode(path, "stream reports 0 audio channels"))?;
        let bit_depth = params
            .bits_per_sample
            .or(params.bits_per_coded_sample)
            .ok_or_else(|| CheckError::decode(path, "stream does not specify a bit depth"))?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&params, &DecoderOptions::default())
            .map_err(|e| CheckError::decode(path, e))?;

        let mut samples: Vec<f64> = Vec::new();
        let mut pcm: Option<PcmBuffer<f32>> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break
                }
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => return Err(CheckError::sample_read(path, e)),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(buf) => buf,
                Err(SymphoniaError::DecodeError(reason)) => {
                    log::warn!("Skipping corrupt FLAC frame in {}: {}", path.display(), reason);
                    continue;
                }
                Err(e) => return Err(CheckError::sample_read(path, e)),
            };

            if pcm.is_none() {
                let spec = *decoded.spec();
                pcm = Some(PcmBuffer::new(decoded.capacity() as u64, spec));
            }

            if let Some(ref mut buf) = pcm {
                buf.copy_interleaved_ref(decoded);
                samples.extend(buf.samples().iter().map(|&s| f64::from(s)));
            }
        }

        let buffer = SampleBuffer::new(samples, sample_rate, bit_depth, channels);

        log::debug!(
            "FLAC {}: {} Hz, {}-bit, {} ch, {} samples",
            path.display(),
            sample_rate,
            bit_depth,
            channels,
            buffer.len()
        );

        metadata.duration = Some(format_duration(buffer.duration_secs()));

        Ok(DecodedAudio {
            format: self.name().to_string(),
            buffer,
            metadata,
        })
    }
}

/// Fill empty fields from standard tag keys, falling back on raw Vorbis
/// comment names. Fields that are already set win.
fn apply_tags(metadata: &mut AudioMetadata, tags: &[Tag]) {
    for tag in tags {
        let slot = match tag.std_key {
            Some(StandardTagKey::TrackTitle) => &mut metadata.title,
            Some(StandardTagKey::Artist) => &mut metadata.artist,
            Some(StandardTagKey::Album) => &mut metadata.album,
            Some(StandardTagKey::Date) => &mut metadata.year,
            Some(StandardTagKey::Genre) => &mut metadata.genre,
            _ => match tag.key.to_ascii_uppercase().as_str() {
                "TITLE" => &mut metadata.title,
                "ARTIST" => &mut metadata.artist,
                "ALBUM" => &mut metadata.album,
                "DATE" | "YEAR" => &mut metadata.year,
                "GENRE" => &mut metadata.genre,
                _ => continue,
            },
        };

        if slot.is_none() {
            let value = tag.value.to_string();
            if !value.is_empty() {
                *slot = Some(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphonia::core::meta::Value;

    fn tag(key: &str, std_key: Option<StandardTagKey>, value: &str) -> Tag {
        Tag::new(std_key, key, Value::String(value.to_string()))
    }

    #[test]
    fn test_apply_standard_tags() {
        let mut metadata = AudioMetadata::default();
        let tags = vec![
            tag("TITLE", Some(StandardTagKey::TrackTitle), "Song"),
            tag("ARTIST", Some(StandardTagKey::Artist), "Band"),
            tag("DATE", Some(StandardTagKey::Date), "1999"),
            tag("COMMENT", Some(StandardTagKey::Comment), "ignored"),
        ];

        apply_tags(&mut metadata, &tags);

        assert_eq!(metadata.title.as_deref(), Some("Song"));
        assert_eq!(metadata.artist.as_deref(), Some("Band"));
        assert_eq!(metadata.year.as_deref(), Some("1999"));
        assert_eq!(metadata.album, None);
    }

    #[test]
    fn test_apply_raw_keys_and_first_wins() {
        let mut metadata = AudioMetadata {
            genre: Some("Jazz".to_string()),
            ..AudioMetadata::default()
        };
        let tags = vec![
            tag("album", None, "Live"),
            tag("YEAR", None, "2001"),
            tag("GENRE", None, "Rock"),
        ];

        apply_tags(&mut metadata, &tags);

        assert_eq!(metadata.album.as_deref(), Some("Live"));
        assert_eq!(metadata.year.as_deref(), Some("2001"));
        assert_eq!(metadata.genre.as_deref(), Some("Jazz"));
    }

    #[test]
    fn test_missing_file_is_decode_failure() {
        let result = FlacDecoder.decode(Path::new("/nonexistent/dir/missing.flac"));
        assert!(matches!(result, Err(CheckError::DecodeFailure { .. })));
    }
}
