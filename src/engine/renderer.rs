//! Offline renderer
//!
//! Evaluates a `Graph` into a `SampleBuffer` of exactly
//! `config.sample_count()` frames. Each node renders to a private `f64`
//! signal; filters keep their state on the stack of a single pass, so a
//! render has no state outside the call.

use crate::dsp::{Automation, BiquadCoeffs, BiquadState, FilterType};
use crate::engine::buffer::SampleBuffer;
use crate::engine::config::RenderConfig;
use crate::engine::graph::{Graph, Node};
use crate::error::{Result, SynthError};

/// Render a graph to a multi-channel buffer
///
/// The mono master mix is copied to every channel of `config`.
///
/// # Errors
/// * `EngineUnavailable` - if a signal buffer cannot be allocated, or the
///   evaluation produced NaN/Inf samples
pub fn render(graph: &Graph, config: &RenderConfig) -> Result<SampleBuffer> {
    let num_samples = config.sample_count();
    let sample_rate = config.sample_rate as f64;
    if sample_rate <= 0.0 {
        return Err(SynthError::engine_unavailable("sample rate must be positive"));
    }

    let mut master = render_node(&graph.master, num_samples, sample_rate)?;
    for sample in master.iter_mut() {
        *sample *= graph.master_gain;
    }

    let mut mono = alloc_signal::<f32>(num_samples)?;
    for (i, &sample) in master.iter().enumerate() {
        if !sample.is_finite() {
            return Err(SynthError::engine_unavailable(format!(
                "non-finite sample {} at frame {}",
                sample, i
            )));
        }
        mono.push(sample as f32);
    }
    drop(master);

    let buffer = SampleBuffer::from_mono(&mono, config.channels as usize, config.sample_rate)?;
    tracing::debug!(
        frames = buffer.len(),
        channels = buffer.num_channels(),
        peak = buffer.peak(),
        "rendered graph"
    );
    Ok(buffer)
}

/// Render one node (and its inputs) to a mono signal
pub fn render_node(node: &Node, num_samples: usize, sample_rate: f64) -> Result<Vec<f64>> {
    match node {
        Node::Oscillator(osc) => {
            let mut out: Vec<f64> = alloc_signal(num_samples)?;
            out.extend(
                (0..num_samples).map(|i| osc.value_at(i as f64 / sample_rate, sample_rate)),
            );
            Ok(out)
        }

        Node::FilteredNoise {
            noise,
            filter,
            cutoff_hz,
            q,
            gain,
        } => {
            let coeffs = BiquadCoeffs::calculate(*filter, sample_rate, *cutoff_hz, *q);
            let mut state = BiquadState::default();
            let mut out: Vec<f64> = alloc_signal(num_samples)?;
            out.extend((0..num_samples).map(|i| {
                let x = noise.get(i).copied().unwrap_or(0.0) as f64;
                state.process(x, &coeffs) * gain
            }));
            Ok(out)
        }

        Node::Filter {
            input,
            filter,
            cutoff_hz,
            q,
        } => {
            let mut signal = render_node(input, num_samples, sample_rate)?;
            let mut state = BiquadState::default();
            if cutoff_hz.is_constant() {
                let coeffs =
                    BiquadCoeffs::calculate(*filter, sample_rate, cutoff_hz.value_at(0.0), *q);
                for sample in signal.iter_mut() {
                    *sample = state.process(*sample, &coeffs);
                }
            } else {
                apply_swept_filter(&mut signal, &mut state, *filter, cutoff_hz, *q, sample_rate);
            }
            Ok(signal)
        }

        Node::Gain { input, gain } => {
            let mut signal = render_node(input, num_samples, sample_rate)?;
            for (i, sample) in signal.iter_mut().enumerate() {
                *sample *= gain.value_at(i as f64 / sample_rate);
            }
            Ok(signal)
        }

        Node::Mix(inputs) => {
            let mut sum: Vec<f64> = alloc_signal(num_samples)?;
            sum.resize(num_samples, 0.0);
            for input in inputs {
                let signal = render_node(input, num_samples, sample_rate)?;
                for (acc, sample) in sum.iter_mut().zip(signal) {
                    *acc += sample;
                }
            }
            Ok(sum)
        }
    }
}

/// Filter with per-sample coefficients following an automated cutoff
fn apply_swept_filter(
    signal: &mut [f64],
    state: &mut BiquadState,
    filter: FilterType,
    cutoff_hz: &Automation,
    q: f64,
    sample_rate: f64,
) {
    for (i, sample) in signal.iter_mut().enumerate() {
        let t = i as f64 / sample_rate;
        let coeffs = BiquadCoeffs::calculate(filter, sample_rate, cutoff_hz.value_at(t), q);
        *sample = state.process(*sample, &coeffs);
    }
}

/// Allocate an empty signal with room for `len` samples
fn alloc_signal<T>(len: usize) -> Result<Vec<T>> {
    let mut signal = Vec::new();
    signal.try_reserve_exact(len).map_err(|e| {
        SynthError::engine_unavailable(format!("cannot allocate {} samples: {}", len, e))
    })?;
    Ok(signal)
}
