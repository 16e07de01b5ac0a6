//! Robotic Waveshaping
//!
//! Memoryless sign-sqrt nonlinearity: each sample maps to
//! sign(x) · sqrt(|x|). Quiet material is pushed toward unity amplitude,
//! which flattens dynamics into the "robotic" character the original
//! pipeline produced. This is waveshaping, not a pitch operation.

use crate::dsp::validate_sample_rate;
use crate::engine::AudioBuffer;
use crate::error::Result;

/// Apply the robotic sign-sqrt waveshaper
///
/// Zero maps to zero; every nonzero sample keeps its sign.
pub fn robotic(buffer: &AudioBuffer) -> Result<AudioBuffer> {
    validate_sample_rate(buffer)?;

    let mut output = buffer.clone();
    for channel in &mut output.samples {
        for sample in channel.iter_mut() {
            let x = *sample;
            *sample = if x == 0.0 {
                0.0
            } else {
                x.signum() * x.abs().sqrt()
            };
        }
    }

    Ok(output)
}
