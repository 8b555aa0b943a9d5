//! DSP Building Blocks
//!
//! Pure signal primitives used by the offline renderer: closed-form
//! oscillators, biquad filters, parameter automation and noise.

mod automation;
mod filter;
mod noise;
mod oscillator;

pub use automation::{Automation, Curve, Segment};
pub use filter::{BiquadCoeffs, BiquadState, FilterType};
pub use noise::{generate_noise, generate_noise_with_rng, generate_seeded_noise};
pub use oscillator::{Oscillator, Waveform};
