//! Cinesynth - Offline Procedural Sound Synthesis
//!
//! Turns a short text description and a target duration into a cinematic
//! placeholder track, without any network access:
//! 1. Keyword classification of the prompt into synthesis parameters
//! 2. A declarative signal graph (drone layer + filtered noise texture)
//! 3. Offline rendering into a stereo float buffer
//! 4. Encoding as a 16-bit PCM WAV file wrapped in an `AudioTrack`
//!
//! # Example
//! ```no_run
//! # async fn run() -> cinesynth::Result<()> {
//! let track = cinesynth::synthesize("A calm rainy night", 5.0).await?;
//! assert_eq!(track.name, "Generated_Cinematic_SFX.wav");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;

pub use engine::{synthesize, AudioTrack, SynthOptions, Synthesizer};
pub use error::{Result, SynthError};
