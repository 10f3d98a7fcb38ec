// tests/test_utils/mod.rs
//
// Signal synthesis and WAV fixtures shared by the integration tests.

#![allow(dead_code)]

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

/// Window length the comb is laid out against
const COMB_GRID: usize = 8192;

/// Fresh directory under the system temp dir; callers remove it when done.
pub fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("losscheckr-{}-{}", label, Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("Failed to create scratch directory");
    dir
}

pub fn sine(freq: f64, sample_rate: u32, len: usize, amplitude: f64) -> Vec<f64> {
    (0..len)
        .map(|i| amplitude * (2.0 * PI * freq * i as f64 / sample_rate as f64).sin())
        .collect()
}

/// Broadband test signal: equal-amplitude partials every 32 bins of an
/// 8192-point grid, up to `max_hz`, with staggered phases. Half a second.
pub fn comb(sample_rate: u32, max_hz: f64) -> Vec<f64> {
    let resolution = sample_rate as f64 / COMB_GRID as f64;
    let partials: Vec<f64> = (32..COMB_GRID / 2)
        .step_by(32)
        .map(|k| k as f64 * resolution)
        .filter(|&f| f <= max_hz)
        .collect();
    let amplitude = 0.9 / partials.len() as f64;

    let len = sample_rate as usize / 2;
    let mut out = vec![0.0; len];
    for (j, &freq) in partials.iter().enumerate() {
        let phase = j as f64 * 0.7;
        for (i, s) in out.iter_mut().enumerate() {
            *s += amplitude * (2.0 * PI * freq * i as f64 / sample_rate as f64 + phase).sin();
        }
    }
    out
}

/// 64-bit LCG yielding values in [-1, 1)
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
    }
}

/// Add uniform noise of the given amplitude
pub fn with_dither(signal: &[f64], amplitude: f64, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    signal.iter().map(|&s| s + amplitude * rng.next_f64()).collect()
}

/// Seeded uniform noise at half full scale
pub fn white_noise(len: usize, seed: u64) -> Vec<f64> {
    with_dither(&vec![0.0; len], 0.5, seed)
}

/// MP3-128-like content: broadband up to 16 kHz over a faint noise bed
pub fn lowpassed_128k(sample_rate: u32) -> Vec<f64> {
    with_dither(&comb(sample_rate, 16000.0), 1e-4, 2)
}

/// Full-bandwidth content reaching close to Nyquist
pub fn full_band(sample_rate: u32) -> Vec<f64> {
    // 97% of Nyquist at 44.1 kHz lands on the 320 kbps signature
    let fraction = if sample_rate == 44100 { 0.99 } else { 0.97 };
    comb(sample_rate, fraction * sample_rate as f64 / 2.0)
}

/// 32-bit float WAV, `samples` interleaved
pub fn write_wav_f32(path: &Path, samples: &[f64], sample_rate: u32, channels: u16) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).expect("Failed to create WAV");
    for &s in samples {
        writer.write_sample(s as f32).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

/// 16-bit PCM WAV, `samples` interleaved
pub fn write_wav_i16(path: &Path, samples: &[f64], sample_rate: u32, channels: u16) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).expect("Failed to create WAV");
    for &s in samples {
        writer
            .write_sample(quantize_i16(s))
            .expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

/// Samples per FLAC frame written by [`write_flac_i16`]
const FLAC_BLOCK_SIZE: usize = 4096;

/// 16-bit FLAC with VERBATIM subframes and a Vorbis comment block.
///
/// `samples` are interleaved and quantized exactly like [`write_wav_i16`].
/// `tags` are `(KEY, value)` pairs.
pub fn write_flac_i16(
    path: &Path,
    samples: &[f64],
    sample_rate: u32,
    channels: u16,
    tags: &[(&str, &str)],
) {
    assert!((1..=8).contains(&channels), "FLAC supports 1 to 8 channels");
    let ch = usize::from(channels);
    let pcm: Vec<i16> = samples.iter().map(|&s| quantize_i16(s)).collect();
    let frames = pcm.len() / ch;

    let mut out = b"fLaC".to_vec();

    // STREAMINFO
    let mut info = Vec::with_capacity(34);
    info.extend_from_slice(&(FLAC_BLOCK_SIZE as u16).to_be_bytes());
    info.extend_from_slice(&(FLAC_BLOCK_SIZE as u16).to_be_bytes());
    info.extend_from_slice(&[0; 6]); // frame sizes unknown
    let packed: u64 = (u64::from(sample_rate) << 44)
        | (u64::from(channels - 1) << 41)
        | (15u64 << 36)
        | frames as u64;
    info.extend_from_slice(&packed.to_be_bytes());
    info.extend_from_slice(&[0; 16]); // no MD5
    push_metadata_block(&mut out, 0, false, &info);

    // VORBIS_COMMENT, little-endian lengths
    let vendor = b"losscheckr tests";
    let mut comment = Vec::new();
    comment.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    comment.extend_from_slice(vendor);
    comment.extend_from_slice(&(tags.len() as u32).to_le_bytes());
    for (key, value) in tags {
        let entry = format!("{}={}", key, value);
        comment.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        comment.extend_from_slice(entry.as_bytes());
    }
    push_metadata_block(&mut out, 4, true, &comment);

    for (number, block) in pcm.chunks(FLAC_BLOCK_SIZE * ch).enumerate() {
        let block_len = block.len() / ch;
        let start = out.len();

        out.extend_from_slice(&[0xFF, 0xF8]); // sync, fixed block size
        out.push((0b0111 << 4) | flac_rate_code(sample_rate));
        out.push(((channels as u8 - 1) << 4) | (0b100 << 1)); // independent, 16-bit
        push_utf8_number(&mut out, number as u64);
        out.extend_from_slice(&((block_len - 1) as u16).to_be_bytes());
        let header_crc = crc8(&out[start..]);
        out.push(header_crc);

        for c in 0..ch {
            out.push(0b0000_0010); // VERBATIM, no wasted bits
            for frame in block.chunks_exact(ch) {
                out.extend_from_slice(&frame[c].to_be_bytes());
            }
        }

        let frame_crc = crc16(&out[start..]);
        out.extend_from_slice(&frame_crc.to_be_bytes());
    }

    fs::write(path, out).expect("Failed to write FLAC");
}

fn quantize_i16(s: f64) -> i16 {
    (s.clamp(-1.0, 1.0) * 32767.0) as i16
}

/// Value a 16-bit sample decodes to after normalization
pub fn dequantize_i16(s: f64) -> f64 {
    f64::from(quantize_i16(s)) / 32768.0
}

fn push_metadata_block(out: &mut Vec<u8>, kind: u8, last: bool, body: &[u8]) {
    out.push(if last { 0x80 | kind } else { kind });
    out.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
    out.extend_from_slice(body);
}

fn flac_rate_code(sample_rate: u32) -> u8 {
    match sample_rate {
        44100 => 0b1001,
        48000 => 0b1010,
        96000 => 0b1011,
        _ => 0b0000, // take it from STREAMINFO
    }
}

/// Frame number in FLAC's extended UTF-8 coding
fn push_utf8_number(out: &mut Vec<u8>, n: u64) {
    if n < 0x80 {
        out.push(n as u8);
        return;
    }
    let mut tail = Vec::new();
    let mut rest = n;
    let mut lead_bits = 6u32;
    while rest >= (1 << lead_bits) {
        tail.push(0x80 | (rest & 0x3F) as u8);
        rest >>= 6;
        lead_bits -= 1;
    }
    let marker = !(0xFFu8 >> (tail.len() + 1));
    out.push(marker | rest as u8);
    out.extend(tail.iter().rev());
}

fn crc8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |mut crc, &b| {
        crc ^= b;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 { (crc << 1) ^ 0x07 } else { crc << 1 };
        }
        crc
    })
}

fn crc16(bytes: &[u8]) -> u16 {
    bytes.iter().fold(0u16, |mut crc, &b| {
        crc ^= u16::from(b) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ 0x8005 } else { crc << 1 };
        }
        crc
    })
}

/// Drop the last `bytes` bytes of a file, keeping its header claims intact
pub fn truncate_file(path: &Path, bytes: u64) {
    let file = fs::OpenOptions::new()
        .write(true)
        .open(path)
        .expect("Failed to open file for truncation");
    let len = file.metadata().expect("Failed to stat file").len();
    file.set_len(len.saturating_sub(bytes))
        .expect("Failed to truncate file");
}

/// Same signal on every channel
pub fn interleave(mono: &[f64], channels: usize) -> Vec<f64> {
    mono.iter()
        .flat_map(|&s| std::iter::repeat(s).take(channels))
        .collect()
}

pub fn run_losscheckr<P: AsRef<std::ffi::OsStr>>(path: P) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_losscheckr"));
    cmd.arg(path);
    cmd.env_remove("LOSSCHECKR_CUTOFF");
    cmd.env_remove("LOSSCHECKR_JOBS");
    cmd
}
