//! CLI Module
//!
//! Command-line interface for the voxmod effects engine.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Voxmod - voice modulation effects engine
#[derive(Parser, Debug)]
#[command(name = "voxmod")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply an effect to a WAV file
    #[command(name = "effect")]
    Effect {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,

        /// Effect request as JSON, e.g. '{"effect":"echo","feedback":0.6}'
        #[arg(short, long)]
        request: String,
    },

    /// Shift the pitch of a WAV file, preserving its duration
    #[command(name = "pitch-shift")]
    PitchShift {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,

        /// Shift in semitones (negative = down, fractional allowed)
        #[arg(short, long, allow_hyphen_values = true)]
        steps: f32,
    },

    /// Write a generated test tone to a WAV file
    #[command(name = "tone")]
    Tone {
        /// Output WAV file
        output: PathBuf,

        /// Tone frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        frequency: f32,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f32,

        /// Sample rate in Hz
        #[arg(short, long, default_value_t = crate::engine::DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_effect_command() {
        let cli = Cli::parse_from([
            "voxmod",
            "effect",
            "in.wav",
            "out.wav",
            "--request",
            r#"{"effect":"robotic"}"#,
        ]);
        match cli.command {
            Some(Commands::Effect { input, output, request }) => {
                assert_eq!(input, PathBuf::from("in.wav"));
                assert_eq!(output, PathBuf::from("out.wav"));
                assert!(request.contains("robotic"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_negative_steps() {
        let cli = Cli::parse_from([
            "voxmod",
            "pitch-shift",
            "in.wav",
            "out.wav",
            "--steps",
            "-2.5",
        ]);
        match cli.command {
            Some(Commands::PitchShift { steps, .. }) => assert_eq!(steps, -2.5),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_tone_defaults() {
        let cli = Cli::parse_from(["voxmod", "tone", "out.wav"]);
        match cli.command {
            Some(Commands::Tone {
                frequency,
                duration,
                sample_rate,
                ..
            }) => {
                assert_eq!(frequency, 440.0);
                assert_eq!(duration, 1.0);
                assert_eq!(sample_rate, crate::engine::DEFAULT_SAMPLE_RATE);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
