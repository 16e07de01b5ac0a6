//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;

use crate::dsp::{self, EffectRequest};
use crate::engine::{export_audio, generate_test_tone, import_audio, ExportFormat};
use crate::error::Result;

/// Apply a JSON-described effect to a WAV file.
pub fn apply_effect(input: &Path, output: &Path, request_json: &str) -> Result<()> {
    let request: EffectRequest = serde_json::from_str(request_json)?;
    info!(
        "Applying {} effect: {} -> {}",
        request.effect_type(),
        input.display(),
        output.display()
    );

    let buffer = import_audio(input)?;
    let processed = dsp::apply(&request, &buffer)?;
    export_audio(&processed, output, ExportFormat::default())?;

    println!(
        "Applied {}: {} ({} samples, {} channel(s))",
        request.effect_type(),
        output.display(),
        processed.len(),
        processed.num_channels()
    );

    Ok(())
}

/// Shift the pitch of a WAV file, preserving its duration.
pub fn pitch_shift(input: &Path, output: &Path, steps: f32) -> Result<()> {
    info!(
        "Pitch shifting by {} semitones: {} -> {}",
        steps,
        input.display(),
        output.display()
    );

    let buffer = import_audio(input)?;
    let shifted = dsp::pitch_shift(&buffer, steps)?;
    export_audio(&shifted, output, ExportFormat::default())?;

    println!(
        "Shifted by {} semitones: {} ({:.2}s)",
        steps,
        output.display(),
        shifted.duration_secs()
    );

    Ok(())
}

/// Write a generated test tone to a WAV file.
pub fn write_tone(output: &Path, frequency: f32, duration_secs: f32, sample_rate: u32) -> Result<()> {
    info!(
        "Generating {}Hz tone ({}s at {}Hz): {}",
        frequency,
        duration_secs,
        sample_rate,
        output.display()
    );

    let tone = generate_test_tone(frequency, duration_secs, sample_rate);
    export_audio(&tone, output, ExportFormat::default())?;

    println!("Tone written: {}", output.display());

    Ok(())
}
