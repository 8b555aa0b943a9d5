//! Signal graph description
//!
//! A graph is a plain value tree: oscillators and noise at the leaves,
//! filters and gain stages wrapping them, mixes summing them. Nothing here
//! holds DSP state; the renderer walks the tree once per request.
//!
//! The synthesized scene has two layers feeding one master gain:
//! - Drone: sawtooth at `f` + square at `1.5 f` (+15 cents), through a
//!   low-pass swept 200 → 800 → 200 Hz, under a symmetric fade envelope
//! - Texture: white noise through the classified filter at constant gain

use crate::dsp::{Automation, FilterType, Oscillator, Waveform};
use crate::engine::classifier::SynthesisParameters;

/// Drone envelope plateau level
pub const DRONE_PEAK_GAIN: f64 = 0.25;

/// Longest fade-in/fade-out of the drone (seconds)
pub const DRONE_MAX_FADE_SECS: f64 = 2.0;

/// Frequency ratio of the second drone oscillator (a fifth)
pub const DRONE_FIFTH_RATIO: f64 = 1.5;

/// Detune of the second drone oscillator (cents)
pub const DRONE_DETUNE_CENTS: f64 = 15.0;

/// Drone filter sweep range (Hz)
pub const DRONE_SWEEP_LOW_HZ: f64 = 200.0;
pub const DRONE_SWEEP_HIGH_HZ: f64 = 800.0;

/// Quality factor shared by the drone and noise filters
pub const FILTER_Q: f64 = 1.0;

/// Gain of the master stage
pub const MASTER_GAIN: f64 = 1.0;

/// One node of the signal graph
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Periodic oscillator, unit amplitude
    Oscillator(Oscillator),
    /// Pre-generated noise through a fixed filter, scaled by `gain`
    FilteredNoise {
        noise: Vec<f32>,
        filter: FilterType,
        cutoff_hz: f64,
        q: f64,
        gain: f64,
    },
    /// Filter with an automated cutoff
    Filter {
        input: Box<Node>,
        filter: FilterType,
        cutoff_hz: Automation,
        q: f64,
    },
    /// Time-varying gain stage
    Gain { input: Box<Node>, gain: Automation },
    /// Sum of the inputs
    Mix(Vec<Node>),
}

impl Node {
    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        match self {
            Node::Oscillator(_) | Node::FilteredNoise { .. } => 1,
            Node::Filter { input, .. } | Node::Gain { input, .. } => 1 + input.node_count(),
            Node::Mix(inputs) => 1 + inputs.iter().map(Node::node_count).sum::<usize>(),
        }
    }
}

/// A complete, renderable scene
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    /// Mono mix fed to every output channel
    pub master: Node,
    pub master_gain: f64,
    pub duration_secs: f64,
}

impl Graph {
    /// The drone layer (first input of the master mix)
    pub fn drone(&self) -> Option<&Node> {
        match &self.master {
            Node::Mix(inputs) => inputs.first(),
            _ => None,
        }
    }

    /// The noise texture layer (second input of the master mix)
    pub fn texture(&self) -> Option<&Node> {
        match &self.master {
            Node::Mix(inputs) => inputs.get(1),
            _ => None,
        }
    }
}

/// Fade length of the drone for a given duration: `min(2, duration / 4)`
pub fn drone_fade_secs(duration_secs: f64) -> f64 {
    DRONE_MAX_FADE_SECS.min(duration_secs / 4.0)
}

/// Build the drone layer
pub fn drone_layer(base_frequency_hz: f64, duration_secs: f64) -> Node {
    let oscillators = Node::Mix(vec![
        Node::Oscillator(Oscillator::new(Waveform::Sawtooth, base_frequency_hz)),
        Node::Oscillator(
            Oscillator::new(Waveform::Square, base_frequency_hz * DRONE_FIFTH_RATIO)
                .with_detune(DRONE_DETUNE_CENTS),
        ),
    ]);

    let swept = Node::Filter {
        input: Box::new(oscillators),
        filter: FilterType::LowPass,
        cutoff_hz: Automation::swell(DRONE_SWEEP_LOW_HZ, DRONE_SWEEP_HIGH_HZ, duration_secs),
        q: FILTER_Q,
    };

    Node::Gain {
        input: Box::new(swept),
        gain: Automation::fade_in_out(
            DRONE_PEAK_GAIN,
            drone_fade_secs(duration_secs),
            duration_secs,
        ),
    }
}

/// Build the noise texture layer around a pre-generated noise buffer
pub fn texture_layer(params: &SynthesisParameters, noise: Vec<f32>) -> Node {
    Node::FilteredNoise {
        noise,
        filter: params.noise_filter,
        cutoff_hz: params.noise_cutoff_hz,
        q: FILTER_Q,
        gain: params.noise_gain,
    }
}

/// Assemble the full scene graph
///
/// `noise` should hold one sample per output frame; the renderer treats a
/// shorter buffer as silence past its end.
pub fn build_graph(params: &SynthesisParameters, duration_secs: f64, noise: Vec<f32>) -> Graph {
    let master = Node::Mix(vec![
        drone_layer(params.base_frequency_hz, duration_secs),
        texture_layer(params, noise),
    ]);
    tracing::debug!(
        nodes = master.node_count(),
        duration_secs,
        "built signal graph"
    );

    Graph {
        master,
        master_gain: MASTER_GAIN,
        duration_secs,
    }
}
