//! WAV encoding and decoding for Cinesynth
//!
//! Encoding writes a canonical 44-byte RIFF/WAVE header followed by
//! frame-interleaved 16-bit little-endian PCM. The header is written by hand
//! so the byte layout is exact and independent of any writer library.
//! Decoding goes through `hound` and accepts the same 16-bit PCM format.

use std::io::{Cursor, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader};
use sha2::{Digest, Sha256};

use crate::engine::buffer::SampleBuffer;
use crate::engine::config::RenderConfig;
use crate::error::{Result, SynthError};

/// Size of the canonical PCM WAV header
pub const WAV_HEADER_LEN: usize = 44;

/// Bit depth of every encoded asset
pub const BITS_PER_SAMPLE: u16 = 16;

/// An encoded audio file with its declared format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAsset {
    bytes: Vec<u8>,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl EncodedAsset {
    /// Raw file bytes (header + payload)
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total file length in bytes
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Length of the PCM payload in bytes
    pub fn data_len(&self) -> usize {
        self.bytes.len().saturating_sub(WAV_HEADER_LEN)
    }

    /// Number of sample frames in the payload
    pub fn sample_count(&self) -> usize {
        let block_align = self.channels as usize * (self.bits_per_sample as usize / 8);
        if block_align == 0 {
            return 0;
        }
        self.data_len() / block_align
    }

    /// Duration of the payload in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count() as f64 / self.sample_rate as f64
    }

    /// SHA-256 digest of the file bytes, lowercase hex
    pub fn checksum(&self) -> String {
        format!("{:x}", Sha256::digest(&self.bytes))
    }
}

/// Encode a rendered buffer as a 16-bit PCM WAV file
///
/// The header's channel count is the buffer's channel count and the sample
/// rate comes from `config`. Samples are clamped to [-1, 1] before
/// quantization, so out-of-range mixes never wrap.
pub fn encode(buffer: &SampleBuffer, config: &RenderConfig) -> EncodedAsset {
    let channels = buffer.num_channels() as u16;
    let sample_rate = config.sample_rate;
    let data_size = buffer.len() * channels as usize * 2;

    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + data_size);
    write_header(&mut bytes, channels, sample_rate, data_size as u32);
    for sample in buffer.interleaved() {
        bytes.extend_from_slice(&quantize(sample).to_le_bytes());
    }

    debug_assert_eq!(bytes.len(), WAV_HEADER_LEN + data_size);
    tracing::debug!(
        bytes = bytes.len(),
        channels,
        sample_rate,
        "encoded wav"
    );

    EncodedAsset {
        bytes,
        channels,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
    }
}

/// Write the 44-byte RIFF/WAVE header for 16-bit PCM
fn write_header(out: &mut Vec<u8>, channels: u16, sample_rate: u32, data_size: u32) {
    let block_align = channels * (BITS_PER_SAMPLE / 8);
    let byte_rate = sample_rate * block_align as u32;
    let riff_size = 36 + data_size; // total file length - 8

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
}

/// Quantize a float sample to signed 16-bit
///
/// Negative values scale by 32768 and non-negative values by 32767, so both
/// -1.0 and 1.0 map to the extremes of the integer range. NaN maps to 0.
#[inline]
pub fn quantize(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0).round() as i16
    } else {
        (s * 32767.0).round() as i16
    }
}

/// Inverse of [`quantize`]
#[inline]
pub fn dequantize(value: i16) -> f32 {
    if value < 0 {
        value as f32 / 32768.0
    } else {
        value as f32 / 32767.0
    }
}

/// Decode WAV bytes produced by [`encode`] (or any 16-bit PCM WAV)
///
/// # Errors
/// * `InvalidAudio` - if the bytes are not a readable 16-bit integer PCM WAV
pub fn decode(bytes: &[u8]) -> Result<SampleBuffer> {
    let mut reader = WavReader::new(Cursor::new(bytes)).map_err(|e| SynthError::InvalidAudio {
        reason: format!("Failed to parse WAV data: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(SynthError::InvalidAudio {
            reason: format!(
                "{}-bit {:?} audio (only 16-bit integer PCM supported)",
                spec.bits_per_sample, spec.sample_format
            ),
            source: None,
        });
    }

    let interleaved = reader
        .samples::<i16>()
        .map(|s| s.map(dequantize))
        .collect::<std::result::Result<Vec<f32>, _>>()
        .map_err(|e| SynthError::InvalidAudio {
            reason: format!("Failed to read 16-bit samples: {}", e),
            source: Some(Box::new(e)),
        })?;

    SampleBuffer::from_interleaved(&interleaved, spec.channels as usize, spec.sample_rate)
}

/// Decode a WAV file from disk
pub fn decode_file(path: &Path) -> Result<SampleBuffer> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Write encoded bytes to `path`, replacing any existing file
pub fn write_asset(asset: &EncodedAsset, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(asset.bytes())?;
    file.flush()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
