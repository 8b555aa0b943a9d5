//! Synthesis Engine Module
//!
//! The request pipeline, leaf-first:
//! - Prompt classification
//! - Signal graph construction
//! - Offline rendering
//! - WAV encoding / decoding
//! - Track assembly and the async entry point

pub mod buffer;
pub mod classifier;
pub mod config;
pub mod graph;
pub mod io;
pub mod renderer;
pub mod synth;
pub mod track;

pub use buffer::SampleBuffer;
pub use classifier::{classify, NoiseFilterKind, SynthesisParameters};
pub use config::{RenderConfig, SynthesisRequest, CHANNEL_COUNT, MAX_DURATION_SECS, SAMPLE_RATE};
pub use graph::{build_graph, Graph, Node};
pub use io::{decode, decode_file, encode, EncodedAsset};
pub use renderer::render;
pub use synth::{run_pipeline, synthesize, SynthOptions, Synthesizer};
pub use track::{assemble, AudioTrack, ResourceHandle, TrackSummary, TRACK_NAME};
