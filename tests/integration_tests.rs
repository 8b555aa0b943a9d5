//! Integration Tests
//!
//! End-to-end tests for the Cinesynth synthesis pipeline.

use std::io::Cursor;

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;

use cinesynth::dsp::{generate_seeded_noise, FilterType};
use cinesynth::engine::{
    build_graph, classify, decode, encode, render, run_pipeline, RenderConfig, SynthesisRequest,
    Synthesizer, SynthOptions,
};

/// Read the data chunk size from a canonical 44-byte header
fn data_size(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]])
}

// === Prompt Scenarios ===

#[tokio::test]
async fn test_calm_rainy_night() {
    let params = classify("A calm rainy night");
    assert_eq!(params.noise_filter, FilterType::LowPass);
    assert_eq!(params.noise_cutoff_hz, 800.0);
    assert_eq!(params.noise_gain, 0.15);
    assert_eq!(params.base_frequency_hz, 60.0);

    let track = cinesynth::synthesize("A calm rainy night", 5.0).await.unwrap();
    let bytes = track.handle.bytes();
    assert_eq!(data_size(bytes), 882_000);
    assert_eq!(bytes.len(), 44 + 882_000);
    assert_eq!(track.duration_secs, 5.0);
}

#[tokio::test]
async fn test_tense_city_chase_clamped() {
    let params = classify("Tense city chase");
    assert_eq!(params.base_frequency_hz, 45.0);
    assert_eq!(params.noise_filter, FilterType::HighPass);
    assert_eq!(params.noise_cutoff_hz, 1000.0);

    let track = cinesynth::synthesize("Tense city chase", 40.0).await.unwrap();
    assert_eq!(track.duration_secs, 30.0);
    assert_eq!(data_size(track.handle.bytes()), 44100 * 30 * 2 * 2);
}

#[test]
fn test_empty_prompt_is_audible() {
    let params = classify("");
    assert_eq!(params.base_frequency_hz, 60.0);
    assert_eq!(params.noise_filter, FilterType::BandPass);
    assert_eq!(params.noise_cutoff_hz, 500.0);
    assert_eq!(params.noise_gain, 0.05);

    let track = Synthesizer::with_options(SynthOptions::default().with_seed(3))
        .synthesize_blocking("", 10.0)
        .unwrap();
    let decoded = decode(track.handle.bytes()).unwrap();
    assert_eq!(decoded.len(), 441_000);

    // Drone plateau of 0.25 dominates the middle of the track
    let middle = &decoded.channel(0)[200_000..240_000];
    let peak = middle.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
    assert!(peak > 0.1, "peak in hold segment = {}", peak);
    assert!(decoded.rms() > 0.01);
}

// === Duration Clamping ===

#[test]
fn test_non_positive_duration_gives_empty_container() {
    for requested in [0.0, -1.0, -1000.0, f64::NAN] {
        let track = run_pipeline(&SynthesisRequest::new("rain", requested), None).unwrap();
        let bytes = track.handle.bytes();
        assert_eq!(bytes.len(), 44);
        assert_eq!(data_size(bytes), 0);
        assert_eq!(track.duration_secs, 0.0);

        let decoded = decode(bytes).unwrap();
        assert_eq!(decoded.len(), 0);
        assert_eq!(decoded.sample_rate, 44100);
    }
}

#[test]
fn test_boundary_tenth_of_a_second() {
    let config = RenderConfig::for_duration(0.1);
    assert_eq!(config.sample_count(), 4410);
    assert_relative_eq!(cinesynth::engine::graph::drone_fade_secs(0.1), 0.025);

    let track = run_pipeline(&SynthesisRequest::new("nature", 0.1), Some(1)).unwrap();
    assert_eq!(track.handle.len(), 44 + 4410 * 4);
}

// === Round Trip ===

#[test]
fn test_decode_matches_render() {
    let config = RenderConfig::for_duration(0.5);
    let noise = generate_seeded_noise(config.sample_count(), 21);
    let graph = build_graph(&classify("happy water"), config.duration_secs, noise);
    let rendered = render(&graph, &config).unwrap();
    let asset = encode(&rendered, &config);

    let decoded = decode(asset.bytes()).unwrap();
    assert_eq!(decoded.len(), rendered.len());
    assert_eq!(decoded.sample_rate, 44100);
    assert_eq!(decoded.num_channels(), 2);

    for ch in 0..2 {
        for (orig, dec) in rendered.channel(ch).iter().zip(decoded.channel(ch)) {
            let expected = orig.clamp(-1.0, 1.0);
            assert!((expected - dec).abs() <= 1.0 / 32767.0);
        }
    }
}

#[test]
fn test_standard_decoder_reads_output() {
    let track = run_pipeline(&SynthesisRequest::new("traffic", 0.25), Some(4)).unwrap();
    let reader = hound::WavReader::new(Cursor::new(track.handle.bytes())).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(reader.duration(), 11025);
}

#[test]
fn test_encoding_same_buffer_is_identical() {
    let config = RenderConfig::for_duration(0.2);
    let noise = generate_seeded_noise(config.sample_count(), 8);
    let rendered = render(&build_graph(&classify("horror"), 0.2, noise), &config).unwrap();
    assert_eq!(
        encode(&rendered, &config).bytes(),
        encode(&rendered, &config).bytes()
    );
}

// === Concurrency ===

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_independent() {
    let synth = Synthesizer::with_options(SynthOptions::default().with_seed(99));
    let (a, b, c) = tokio::join!(
        synth.synthesize("rain", 0.3),
        synth.synthesize("rain", 0.3),
        synth.synthesize("city", 0.2),
    );
    let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());

    assert_eq!(a.handle.bytes(), b.handle.bytes());
    assert_ne!(a.id, b.id);
    assert_eq!(c.handle.len(), 44 + 8820 * 4);
}

#[tokio::test]
async fn test_min_latency_is_honoured() {
    let synth = Synthesizer::with_options(
        SynthOptions::default().with_min_latency(std::time::Duration::from_millis(100)),
    );
    let started = std::time::Instant::now();
    synth.synthesize("", 0.0).await.unwrap();
    assert!(started.elapsed() >= std::time::Duration::from_millis(100));
}
