//! Voxmod CLI - Voice Modulation Effects Engine
//!
//! Command-line interface for the voxmod effects engine.

use clap::Parser;
use env_logger::Env;
use log::info;

use voxmod::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Voxmod Effects Engine v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Voxmod Effects Engine v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Effect {
            input,
            output,
            request,
        } => voxmod::cli::commands::apply_effect(&input, &output, &request)?,
        Commands::PitchShift {
            input,
            output,
            steps,
        } => voxmod::cli::commands::pitch_shift(&input, &output, steps)?,
        Commands::Tone {
            output,
            frequency,
            duration,
            sample_rate,
        } => voxmod::cli::commands::write_tone(&output, frequency, duration, sample_rate)?,
    }
    Ok(())
}
