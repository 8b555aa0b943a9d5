//! Periodic oscillators
//!
//! Oscillators are evaluated in closed form: the value at time `t` depends
//! only on `frequency * t`, so the renderer can sample them at any offset
//! without carrying phase state between samples. Discontinuities are
//! smoothed with PolyBLEP to keep the low drone free of aliasing fizz.

use serde::{Deserialize, Serialize};

/// Supported waveform shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Sawtooth,
    Square,
}

/// A free-running periodic oscillator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub waveform: Waveform,
    /// Nominal frequency in Hz
    pub frequency_hz: f64,
    /// Pitch offset in cents (100 cents = one semitone)
    pub detune_cents: f64,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency_hz: f64) -> Self {
        Self {
            waveform,
            frequency_hz,
            detune_cents: 0.0,
        }
    }

    pub fn with_detune(mut self, cents: f64) -> Self {
        self.detune_cents = cents;
        self
    }

    /// Frequency after applying detune
    #[inline]
    pub fn effective_frequency(&self) -> f64 {
        self.frequency_hz * 2.0_f64.powf(self.detune_cents / 1200.0)
    }

    /// Value of the waveform at time `t` (seconds)
    ///
    /// `sample_rate` only sizes the PolyBLEP correction window.
    pub fn value_at(&self, t: f64, sample_rate: f64) -> f64 {
        let freq = self.effective_frequency();
        let phase = (freq * t).rem_euclid(1.0);
        let inc = if sample_rate > 0.0 { freq / sample_rate } else { 0.0 };
        self.waveform.sample(phase, inc)
    }
}

impl Waveform {
    /// Sample the waveform at a normalized phase in [0, 1)
    pub fn sample(self, phase: f64, inc: f64) -> f64 {
        match self {
            Waveform::Sine => (2.0 * std::f64::consts::PI * phase).sin(),
            Waveform::Sawtooth => {
                let naive = 2.0 * phase - 1.0;
                naive - poly_blep(phase, inc)
            }
            Waveform::Square => {
                let mut value = if phase < 0.5 { 1.0 } else { -1.0 };
                value += poly_blep(phase, inc);
                value -= poly_blep((phase + 0.5) % 1.0, inc);
                value
            }
        }
    }
}

/// Polynomial band-limited step correction
fn poly_blep(phase: f64, inc: f64) -> f64 {
    if inc <= 0.0 {
        return 0.0;
    }
    if phase < inc {
        let t = phase / inc;
        2.0 * t - t * t - 1.0
    } else if phase > 1.0 - inc {
        let t = (phase - 1.0) / inc;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}
