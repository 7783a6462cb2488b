//! Resona CLI - reverberation-time analysis from the command line.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resona")]
#[command(author, version, about = "Room-acoustic decay analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate per-band reverberation time (T30) from an impulse response
    Analyze(commands::analyze::AnalyzeArgs),

    /// Export the energy-decay curve of one octave band
    Decay(commands::decay::DecayArgs),

    /// Trim trailing low-level samples from a WAV file
    Trim(commands::trim::TrimArgs),

    /// Generate synthetic test signals
    Generate(commands::generate::GenerateArgs),

    /// Display WAV file metadata
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Decay(args) => commands::decay::run(args),
        Commands::Trim(args) => commands::trim::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
