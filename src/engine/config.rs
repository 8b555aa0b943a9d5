//! Request and render configuration
//!
//! Every request renders stereo 16-bit audio at 44.1 kHz. The only input
//! that shapes the configuration is the requested duration, which is
//! clamped to `[0, MAX_DURATION_SECS]` without raising an error.

use serde::{Deserialize, Serialize};

/// Output sample rate for every render (Hz)
pub const SAMPLE_RATE: u32 = 44100;

/// Output channel count for every render
pub const CHANNEL_COUNT: u16 = 2;

/// Longest track the engine will synthesize (seconds)
pub const MAX_DURATION_SECS: f64 = 30.0;

/// A single synthesis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub prompt: String,
    pub requested_duration_secs: f64,
}

impl SynthesisRequest {
    pub fn new(prompt: impl Into<String>, requested_duration_secs: f64) -> Self {
        Self {
            prompt: prompt.into(),
            requested_duration_secs,
        }
    }

    /// Derive the render configuration for this request
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::for_duration(self.requested_duration_secs)
    }
}

/// Fixed-format render configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub channels: u16,
    pub sample_rate: u32,
    /// Clamped duration in seconds, always within [0, 30]
    pub duration_secs: f64,
}

impl RenderConfig {
    /// Build a configuration from a requested duration
    ///
    /// Negative and NaN durations clamp to 0; anything above 30 s (including
    /// infinity) clamps to exactly 30 s.
    pub fn for_duration(requested_secs: f64) -> Self {
        let duration_secs = clamp_duration(requested_secs);
        if duration_secs != requested_secs {
            tracing::warn!(
                requested = requested_secs,
                effective = duration_secs,
                "requested duration clamped"
            );
        }

        Self {
            channels: CHANNEL_COUNT,
            sample_rate: SAMPLE_RATE,
            duration_secs,
        }
    }

    /// Number of sample frames per channel
    #[inline]
    pub fn sample_count(&self) -> usize {
        (self.sample_rate as f64 * self.duration_secs).round() as usize
    }

    /// Size of the encoded file in bytes (header + 16-bit PCM payload)
    #[inline]
    pub fn encoded_len(&self) -> usize {
        44 + self.sample_count() * self.channels as usize * 2
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::for_duration(0.0)
    }
}

fn clamp_duration(requested_secs: f64) -> f64 {
    if requested_secs.is_nan() {
        return 0.0;
    }
    requested_secs.clamp(0.0, MAX_DURATION_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(-5.0, 0.0 ; "negative clamps to zero")]
    #[test_case(0.0, 0.0 ; "zero stays zero")]
    #[test_case(5.0, 5.0 ; "in range passes through")]
    #[test_case(30.0, 30.0 ; "upper bound kept")]
    #[test_case(40.0, 30.0 ; "over limit clamps")]
    #[test_case(f64::INFINITY, 30.0 ; "infinity clamps")]
    #[test_case(f64::NAN, 0.0 ; "nan clamps to zero")]
    fn test_duration_clamp(requested: f64, expected: f64) {
        let config = RenderConfig::for_duration(requested);
        assert_eq!(config.duration_secs, expected);
        assert_eq!(config.channels, 2);
        assert_eq!(config.sample_rate, 44100);
    }

    #[test]
    fn test_sample_count_rounds() {
        assert_eq!(RenderConfig::for_duration(5.0).sample_count(), 220_500);
        assert_eq!(RenderConfig::for_duration(0.1).sample_count(), 4410);
        // 1e-5 s is 0.441 samples
        assert_eq!(RenderConfig::for_duration(1e-5).sample_count(), 0);
        // 2e-5 s is 0.882 samples
        assert_eq!(RenderConfig::for_duration(2e-5).sample_count(), 1);
        assert_eq!(RenderConfig::for_duration(30.0).sample_count(), 1_323_000);
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(RenderConfig::for_duration(0.0).encoded_len(), 44);
        assert_eq!(RenderConfig::for_duration(5.0).encoded_len(), 44 + 882_000);
    }

    #[test]
    fn test_request_render_config() {
        let request = SynthesisRequest::new("Tense city chase", 40.0);
        assert_eq!(request.render_config().duration_secs, 30.0);
    }
}
