//! Cinesynth CLI - Offline Procedural Sound Synthesis
//!
//! Command-line interface for the Cinesynth engine.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cinesynth::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger (RUST_LOG overrides the default level)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Cinesynth v{}", env!("CARGO_PKG_VERSION"));

    handle_command(cli.command).await
}

async fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Generate {
            prompt,
            duration,
            output,
            seed,
            latency_ms,
            json,
        } => commands::generate(&prompt, duration, &output, seed, latency_ms, json)
            .await
            .with_context(|| format!("failed to generate {}", output.display())),
        Commands::Classify { prompt, json } => {
            commands::classify_prompt(&prompt, json).context("failed to classify prompt")
        }
        Commands::Inspect { path } => {
            commands::inspect(&path).with_context(|| format!("failed to inspect {}", path.display()))
        }
    }
}
