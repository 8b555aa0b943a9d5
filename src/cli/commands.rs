//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::engine::{classify, decode_file, SynthOptions, Synthesizer};
use crate::error::Result;

/// Synthesize a track and write it to `output`.
pub async fn generate(
    prompt: &str,
    duration: f64,
    output: &Path,
    seed: Option<u64>,
    latency_ms: u64,
    json: bool,
) -> Result<()> {
    info!("Generating {:.2}s track for prompt: {:?}", duration, prompt);

    let mut options = SynthOptions::default().with_min_latency(Duration::from_millis(latency_ms));
    if let Some(seed) = seed {
        options = options.with_seed(seed);
    }

    let track = Synthesizer::with_options(options)
        .synthesize(prompt, duration)
        .await?;
    track.handle.write_to(output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&track.summary())?);
    } else {
        println!("Track written: {}", output.display());
        println!("Name: {}", track.name);
        println!("Duration: {:.3}s", track.duration_secs);
        println!("Size: {} bytes", track.handle.len());
        println!("SHA-256: {}", track.handle.asset().checksum());
    }

    Ok(())
}

/// Print the parameters derived from `prompt`.
pub fn classify_prompt(prompt: &str, json: bool) -> Result<()> {
    let params = classify(prompt);

    if json {
        println!("{}", serde_json::to_string_pretty(&params)?);
    } else {
        println!("Base frequency: {} Hz", params.base_frequency_hz);
        println!(
            "Noise: {} @ {} Hz, gain {}",
            params.noise_filter, params.noise_cutoff_hz, params.noise_gain
        );
    }

    Ok(())
}

/// Decode a WAV file and print its format.
pub fn inspect(path: &Path) -> Result<()> {
    info!("Inspecting: {}", path.display());

    let buffer = decode_file(path)?;
    println!("File: {}", path.display());
    println!("Channels: {}", buffer.num_channels());
    println!("Sample rate: {} Hz", buffer.sample_rate);
    println!("Samples: {}", buffer.len());
    println!("Duration: {:.3}s", buffer.duration_secs());
    println!("Peak: {:.1} dBFS", buffer.peak_db());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_generate_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rain.wav");

        generate("rain", 0.05, &path, Some(1), 0, true).await.unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 44 + 2205 * 4);
        inspect(&path).unwrap();
    }

    #[test]
    fn test_classify_prompt() {
        classify_prompt("Tense city chase", false).unwrap();
        classify_prompt("", true).unwrap();
    }

    #[test]
    fn test_inspect_missing_file() {
        assert!(inspect(Path::new("/nonexistent/file.wav")).is_err());
    }
}
