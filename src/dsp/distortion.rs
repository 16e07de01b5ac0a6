//! Distortion Effect
//!
//! Hard-clipping gain distortion: scale every sample, then limit it to the
//! clip bound. Pointwise and history-free; once every sample sits at ±clip
//! the transform is idempotent.

use crate::dsp::validate_sample_rate;
use crate::engine::AudioBuffer;
use crate::error::{Result, VoxError};

/// Apply clipping distortion to the buffer
///
/// Output sample `i` = clamp(input `i` × `gain`, −`clip`, +`clip`).
///
/// # Errors
/// `InvalidParameter` if `gain` or `clip` is negative or not finite, or the
/// buffer sample rate is zero.
pub fn distortion(buffer: &AudioBuffer, gain: f32, clip: f32) -> Result<AudioBuffer> {
    validate_sample_rate(buffer)?;
    if !gain.is_finite() || gain < 0.0 {
        return Err(VoxError::invalid_parameter(
            "gain",
            format!("must be a non-negative finite multiplier, got {}", gain),
        ));
    }
    if !clip.is_finite() || clip < 0.0 {
        return Err(VoxError::invalid_parameter(
            "clip",
            format!("must be a non-negative finite bound, got {}", clip),
        ));
    }

    let mut output = buffer.clone();
    for channel in &mut output.samples {
        for sample in channel.iter_mut() {
            *sample = (*sample * gain).clamp(-clip, clip);
        }
    }

    Ok(output)
}
