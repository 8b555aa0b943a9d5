//! Prompt classification
//!
//! Maps a free-text prompt to synthesis parameters with case-insensitive
//! keyword matching. Each rule table is checked in order and the first match
//! wins; a default always applies, so classification never fails.

use serde::{Deserialize, Serialize};

use crate::dsp::FilterType;

/// Filter applied to the noise texture layer
pub type NoiseFilterKind = FilterType;

/// Parameters derived from a prompt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    /// Fundamental of the drone layer (Hz)
    pub base_frequency_hz: f64,
    pub noise_filter: NoiseFilterKind,
    pub noise_cutoff_hz: f64,
    pub noise_gain: f64,
}

/// Base frequency rules: (keywords, Hz)
const BASE_FREQUENCY_RULES: &[(&[&str], f64)] = &[
    // Sub-bass
    (&["tense", "horror"], 45.0),
    // Brighter
    (&["happy", "nature"], 110.0),
];

/// Default cinematic low drone
const DEFAULT_BASE_FREQUENCY_HZ: f64 = 60.0;

/// Noise shaping rules: (keywords, filter, cutoff Hz, gain)
const NOISE_RULES: &[(&[&str], NoiseFilterKind, f64, f64)] = &[
    (&["rain", "water"], FilterType::LowPass, 800.0, 0.15),
    (&["city", "traffic"], FilterType::HighPass, 1000.0, 0.05),
];

/// Subtle texture default
const DEFAULT_NOISE: (NoiseFilterKind, f64, f64) = (FilterType::BandPass, 500.0, 0.05);

/// Classify a prompt into synthesis parameters
pub fn classify(prompt: &str) -> SynthesisParameters {
    let prompt_lower = prompt.to_lowercase();

    let base_frequency_hz = BASE_FREQUENCY_RULES
        .iter()
        .find(|(keywords, _)| matches_any(&prompt_lower, keywords))
        .map(|&(_, hz)| hz)
        .unwrap_or(DEFAULT_BASE_FREQUENCY_HZ);

    let (noise_filter, noise_cutoff_hz, noise_gain) = NOISE_RULES
        .iter()
        .find(|(keywords, ..)| matches_any(&prompt_lower, keywords))
        .map(|&(_, filter, cutoff, gain)| (filter, cutoff, gain))
        .unwrap_or(DEFAULT_NOISE);

    let params = SynthesisParameters {
        base_frequency_hz,
        noise_filter,
        noise_cutoff_hz,
        noise_gain,
    };
    tracing::debug!(?params, "classified prompt");
    params
}

fn matches_any(prompt: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| prompt.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("A calm rainy night", 60.0 ; "no mood keyword")]
    #[test_case("Tense city chase", 45.0 ; "tense")]
    #[test_case("HORROR corridor", 45.0 ; "uppercase horror")]
    #[test_case("happy birthday", 110.0 ; "happy")]
    #[test_case("nature walk", 110.0 ; "nature")]
    #[test_case("tense but happy", 45.0 ; "tense wins over happy")]
    #[test_case("", 60.0 ; "empty prompt")]
    fn test_base_frequency(prompt: &str, expected: f64) {
        assert_eq!(classify(prompt).base_frequency_hz, expected);
    }

    #[test_case("A calm rainy night", FilterType::LowPass, 800.0, 0.15 ; "rain")]
    #[test_case("Running WATER", FilterType::LowPass, 800.0, 0.15 ; "water")]
    #[test_case("Tense city chase", FilterType::HighPass, 1000.0, 0.05 ; "city")]
    #[test_case("morning traffic", FilterType::HighPass, 1000.0, 0.05 ; "traffic")]
    #[test_case("rain over the city", FilterType::LowPass, 800.0, 0.15 ; "rain wins over city")]
    #[test_case("", FilterType::BandPass, 500.0, 0.05 ; "default texture")]
    fn test_noise_shaping(prompt: &str, filter: FilterType, cutoff: f64, gain: f64) {
        let params = classify(prompt);
        assert_eq!(params.noise_filter, filter);
        assert_eq!(params.noise_cutoff_hz, cutoff);
        assert_eq!(params.noise_gain, gain);
    }

    #[test]
    fn test_deterministic() {
        for prompt in ["", "Tense city chase", "unrelated words", "Ünïcödé rain"] {
            assert_eq!(classify(prompt), classify(prompt));
        }
    }

    #[test]
    fn test_substring_matching() {
        // "terrain" contains "rain"
        assert_eq!(classify("mountain terrain").noise_filter, FilterType::LowPass);
    }
}
