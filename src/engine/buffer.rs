//! Rendered sample buffers
//!
//! Non-interleaved 32-bit float audio, one `Vec<f32>` per channel. A buffer
//! is owned by a single render call and handed straight to the encoder.

use crate::error::{Result, SynthError};

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert linear amplitude to decibels
///
/// Returns `f32::NEG_INFINITY` for zero input.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

// ============================================================================
// Sample Buffer
// ============================================================================

/// Multi-channel float sample buffer
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    /// Sample data: outer Vec is channels, inner Vec is samples
    pub samples: Vec<Vec<f32>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl SampleBuffer {
    /// Create a zeroed buffer
    pub fn new(num_channels: usize, num_samples: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![vec![0.0_f32; num_samples]; num_channels],
            sample_rate,
        }
    }

    /// Copy one mono signal into `num_channels` identical channels
    ///
    /// Allocation failure is reported as `EngineUnavailable` rather than
    /// aborting the process.
    pub fn from_mono(mono: &[f32], num_channels: usize, sample_rate: u32) -> Result<Self> {
        let mut samples = Vec::with_capacity(num_channels);
        for _ in 0..num_channels {
            let mut channel = Vec::new();
            channel.try_reserve_exact(mono.len()).map_err(|e| {
                SynthError::engine_unavailable(format!(
                    "cannot allocate {} samples: {}",
                    mono.len(),
                    e
                ))
            })?;
            channel.extend_from_slice(mono);
            samples.push(channel);
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a buffer from interleaved sample data
    pub fn from_interleaved(
        interleaved: &[f32],
        num_channels: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if num_channels == 0 {
            return Err(SynthError::InvalidAudio {
                reason: "channel count must be at least 1".to_string(),
                source: None,
            });
        }

        if interleaved.len() % num_channels != 0 {
            return Err(SynthError::InvalidAudio {
                reason: format!(
                    "Interleaved data length {} is not divisible by channel count {}",
                    interleaved.len(),
                    num_channels
                ),
                source: None,
            });
        }

        let num_samples = interleaved.len() / num_channels;
        let mut samples = vec![Vec::with_capacity(num_samples); num_channels];

        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Get the number of channels
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.samples.len()
    }

    /// Get the number of samples per channel
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    /// Iterate samples in interleaved frame order (L, R, L, R, ...)
    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        let channels = self.num_channels();
        (0..self.len() * channels).map(move |i| self.samples[i % channels][i / channels])
    }

    /// Absolute peak across all channels (linear)
    pub fn peak(&self) -> f32 {
        self.samples
            .iter()
            .flat_map(|channel| channel.iter())
            .map(|&s| s.abs())
            .fold(0.0_f32, f32::max)
    }

    /// Peak level in dBFS
    pub fn peak_db(&self) -> f32 {
        linear_to_db(self.peak())
    }

    /// RMS level across all channels (linear)
    pub fn rms(&self) -> f32 {
        let total_samples = self.num_channels() * self.len();
        if total_samples == 0 {
            return 0.0;
        }

        let sum_squares: f64 = self
            .samples
            .iter()
            .flat_map(|channel| channel.iter())
            .map(|&s| (s as f64) * (s as f64))
            .sum();

        (sum_squares / total_samples as f64).sqrt() as f32
    }

    /// Check that every sample is finite (no NaN/Inf)
    pub fn is_finite(&self) -> bool {
        self.samples
            .iter()
            .flat_map(|channel| channel.iter())
            .all(|s| s.is_finite())
    }
}
