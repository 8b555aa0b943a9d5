//! Synthesis entry point
//!
//! Runs classify → build graph → render → encode → assemble for one
//! request. The pipeline is synchronous and CPU-bound; the async entry point
//! moves it onto Tokio's blocking pool so callers on an interactive task are
//! never stalled. Every call builds its own noise, graph and buffers.

use std::time::{Duration, Instant};

use crate::dsp::{generate_noise, generate_seeded_noise};
use crate::engine::classifier::classify;
use crate::engine::config::SynthesisRequest;
use crate::engine::graph::build_graph;
use crate::engine::io::encode;
use crate::engine::renderer::render;
use crate::engine::track::{assemble, AudioTrack};
use crate::error::{Result, SynthError};

/// "Processing" delay used by interactive front ends
pub const INTERACTIVE_MIN_LATENCY: Duration = Duration::from_millis(1500);

/// Options for a `Synthesizer`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthOptions {
    /// Minimum wall-clock time a call takes; zero disables padding
    pub min_latency: Duration,
    /// Fixed noise seed for reproducible output; `None` draws fresh entropy
    pub seed: Option<u64>,
}

impl SynthOptions {
    /// Options matching the interactive front end (1.5 s minimum latency)
    pub fn interactive() -> Self {
        Self {
            min_latency: INTERACTIVE_MIN_LATENCY,
            seed: None,
        }
    }

    pub fn with_min_latency(mut self, min_latency: Duration) -> Self {
        self.min_latency = min_latency;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Procedural sound synthesizer
///
/// Holds only immutable options, so one instance can serve any number of
/// concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    options: SynthOptions,
}

impl Synthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SynthOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SynthOptions {
        &self.options
    }

    /// Synthesize a track from a prompt
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// * `EngineUnavailable` - if rendering cannot be performed
    pub async fn synthesize(&self, prompt: &str, requested_duration_secs: f64) -> Result<AudioTrack> {
        let started = Instant::now();
        let request = SynthesisRequest::new(prompt, requested_duration_secs);
        let seed = self.options.seed;

        let track = tokio::task::spawn_blocking(move || run_pipeline(&request, seed))
            .await
            .map_err(|e| SynthError::engine_unavailable(format!("render task failed: {}", e)))??;

        if let Some(remaining) = self.options.min_latency.checked_sub(started.elapsed()) {
            tokio::time::sleep(remaining).await;
        }
        Ok(track)
    }

    /// Synthesize on the current thread
    pub fn synthesize_blocking(&self, prompt: &str, requested_duration_secs: f64) -> Result<AudioTrack> {
        let started = Instant::now();
        let request = SynthesisRequest::new(prompt, requested_duration_secs);
        let track = run_pipeline(&request, self.options.seed)?;

        if let Some(remaining) = self.options.min_latency.checked_sub(started.elapsed()) {
            std::thread::sleep(remaining);
        }
        Ok(track)
    }
}

/// Synthesize a track with default options
///
/// Empty or unrecognized prompts fall back to default parameters and
/// durations are clamped to [0, 30] seconds; the only failure is
/// `EngineUnavailable`.
pub async fn synthesize(prompt: &str, requested_duration_secs: f64) -> Result<AudioTrack> {
    Synthesizer::new()
        .synthesize(prompt, requested_duration_secs)
        .await
}

/// Run the full pipeline for one request
pub fn run_pipeline(request: &SynthesisRequest, seed: Option<u64>) -> Result<AudioTrack> {
    let config = request.render_config();
    let params = classify(&request.prompt);

    let sample_count = config.sample_count();
    let noise = match seed {
        Some(seed) => generate_seeded_noise(sample_count, seed),
        None => generate_noise(sample_count),
    };

    let graph = build_graph(&params, config.duration_secs, noise);
    let buffer = render(&graph, &config)?;
    drop(graph);

    let asset = encode(&buffer, &config);
    drop(buffer);

    let track = assemble(asset, &config);
    tracing::info!(
        id = %track.id,
        duration_secs = track.duration_secs,
        bytes = track.handle.len(),
        "synthesized track"
    );
    Ok(track)
}
