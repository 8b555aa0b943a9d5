//! CLI Module
//!
//! Command-line interface for the Cinesynth engine.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::TRACK_NAME;

/// Cinesynth - offline procedural sound effects from text prompts
#[derive(Parser, Debug)]
#[command(name = "cinesynth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize a track and write it as a WAV file
    #[command(name = "generate")]
    Generate {
        /// Text description of the sound
        prompt: String,

        /// Requested duration in seconds (clamped to 0-30)
        #[arg(short, long, default_value_t = 10.0, allow_negative_numbers = true)]
        duration: f64,

        /// Output path
        #[arg(short, long, default_value = TRACK_NAME)]
        output: PathBuf,

        /// Noise seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Minimum processing time in milliseconds
        #[arg(long, default_value_t = 0)]
        latency_ms: u64,

        /// Print track metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the synthesis parameters derived from a prompt
    #[command(name = "classify")]
    Classify {
        /// Text description of the sound
        prompt: String,

        /// Print parameters as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a WAV file and print its format
    #[command(name = "inspect")]
    Inspect {
        /// Path to the WAV file
        path: PathBuf,
    },
}
