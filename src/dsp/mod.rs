//! DSP Effects Engine
//!
//! Stateless, deterministic transforms over an [`AudioBuffer`]: each effect
//! is a pure function from one buffer to a new buffer. Nothing here blocks,
//! retries, or shares mutable state; concurrent calls on independent buffers
//! are safe by construction.
//!
//! Effects validate their parameters up front and fail with
//! `InvalidParameter` rather than substituting defaults silently.

mod distortion;
mod echo;
mod pitch;
mod robotic;
mod smoothing;

pub use distortion::distortion;
pub use echo::echo;
pub use pitch::pitch_shift;
pub use robotic::robotic;
pub use smoothing::smoothing;

use serde::{Deserialize, Serialize};

use crate::engine::AudioBuffer;
use crate::error::{Result, VoxError};

/// Default echo delay in samples
pub const DEFAULT_DELAY_SAMPLES: usize = 1000;

/// Default echo feedback gain
pub const DEFAULT_FEEDBACK: f32 = 0.6;

/// Default distortion pre-gain
pub const DEFAULT_GAIN: f32 = 2.0;

/// Default distortion clip bound
pub const DEFAULT_CLIP: f32 = 1.0;

/// Default smoothing kernel length in samples
pub const DEFAULT_KERNEL_LENGTH: usize = 1000;

/// A tagged choice of effect kind plus its parameters
///
/// Serializes with an `effect` tag so requests round-trip through JSON for
/// the CLI and embedders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EffectRequest {
    /// Mix in a delayed copy of the signal
    Echo {
        #[serde(default = "default_delay_samples")]
        delay_samples: usize,
        #[serde(default = "default_feedback")]
        feedback: f32,
    },
    /// Hard-clipping gain distortion
    Distortion {
        #[serde(default = "default_gain")]
        gain: f32,
        #[serde(default = "default_clip")]
        clip: f32,
    },
    /// Sign-sqrt waveshaping
    Robotic,
    /// Uniform moving-average smoothing (the original called this "reverb")
    Smoothing {
        #[serde(default = "default_kernel_length")]
        kernel_length: usize,
    },
    /// Duration-preserving semitone pitch shift
    PitchShift { shift_steps: f32 },
}

fn default_delay_samples() -> usize {
    DEFAULT_DELAY_SAMPLES
}

fn default_feedback() -> f32 {
    DEFAULT_FEEDBACK
}

fn default_gain() -> f32 {
    DEFAULT_GAIN
}

fn default_clip() -> f32 {
    DEFAULT_CLIP
}

fn default_kernel_length() -> usize {
    DEFAULT_KERNEL_LENGTH
}

impl EffectRequest {
    /// Get the effect kind identifier
    pub fn effect_type(&self) -> &'static str {
        match self {
            EffectRequest::Echo { .. } => "echo",
            EffectRequest::Distortion { .. } => "distortion",
            EffectRequest::Robotic => "robotic",
            EffectRequest::Smoothing { .. } => "smoothing",
            EffectRequest::PitchShift { .. } => "pitch_shift",
        }
    }
}

/// Apply a requested effect, producing a new buffer
pub fn apply(request: &EffectRequest, buffer: &AudioBuffer) -> Result<AudioBuffer> {
    tracing::debug!(effect = request.effect_type(), "applying effect");
    match *request {
        EffectRequest::Echo {
            delay_samples,
            feedback,
        } => echo(buffer, delay_samples, feedback),
        EffectRequest::Distortion { gain, clip } => distortion(buffer, gain, clip),
        EffectRequest::Robotic => robotic(buffer),
        EffectRequest::Smoothing { kernel_length } => smoothing(buffer, kernel_length),
        EffectRequest::PitchShift { shift_steps } => pitch_shift(buffer, shift_steps),
    }
}

/// Reject buffers with an invalid sample rate
///
/// Shared precondition: the AudioBuffer invariant requires sample rate > 0.
pub(crate) fn validate_sample_rate(buffer: &AudioBuffer) -> Result<()> {
    if buffer.sample_rate == 0 {
        return Err(VoxError::invalid_parameter(
            "sample_rate",
            "must be greater than zero",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::buffer::DEFAULT_SAMPLE_RATE;

    #[test]
    fn test_effect_request_json_roundtrip() {
        let request = EffectRequest::Echo {
            delay_samples: 500,
            feedback: 0.4,
        };
        let json = serde_json::to_string(&request).unwrap();
        let parsed: EffectRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_effect_request_defaults_from_tag_only() {
        let parsed: EffectRequest = serde_json::from_str(r#"{"effect": "echo"}"#).unwrap();
        assert_eq!(
            parsed,
            EffectRequest::Echo {
                delay_samples: DEFAULT_DELAY_SAMPLES,
                feedback: DEFAULT_FEEDBACK,
            }
        );

        let parsed: EffectRequest = serde_json::from_str(r#"{"effect": "robotic"}"#).unwrap();
        assert_eq!(parsed, EffectRequest::Robotic);
    }

    #[test]
    fn test_apply_dispatch() {
        let buffer = AudioBuffer::from_mono(vec![0.5; 2000], DEFAULT_SAMPLE_RATE);

        let out = apply(&EffectRequest::Distortion { gain: 4.0, clip: 1.0 }, &buffer).unwrap();
        assert!(out.samples[0].iter().all(|&s| s == 1.0));

        let out = apply(&EffectRequest::Robotic, &buffer).unwrap();
        assert!((out.samples[0][0] - 0.5_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_apply_rejects_zero_sample_rate() {
        let buffer = AudioBuffer::from_mono(vec![0.5; 100], 0);
        let result = apply(
            &EffectRequest::Echo {
                delay_samples: 10,
                feedback: 0.5,
            },
            &buffer,
        );
        assert!(matches!(
            result,
            Err(crate::error::VoxError::InvalidParameter { .. })
        ));
    }
}
