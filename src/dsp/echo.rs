//! Echo Effect
//!
//! Mixes the input with a copy of itself shifted forward by a fixed number of
//! samples. The delayed copy starts with silence and is truncated at the end
//! so the output length equals the input length.
//!
//! No clipping happens here: mixing is additive and may exceed [-1, 1], as a
//! real echo does. The encoder clamps at quantization time.

use crate::dsp::validate_sample_rate;
use crate::engine::AudioBuffer;
use crate::error::{Result, VoxError};

/// Apply an echo to the buffer
///
/// Output sample `i` = input `i` + `feedback` × input `i - delay_samples`
/// (treating indices before the delay as silence). If `delay_samples` is at
/// least the buffer length, the delayed copy is entirely silence and the
/// output equals the input exactly.
///
/// # Errors
/// `InvalidParameter` if `feedback` is negative or not finite, or the buffer
/// sample rate is zero.
pub fn echo(buffer: &AudioBuffer, delay_samples: usize, feedback: f32) -> Result<AudioBuffer> {
    validate_sample_rate(buffer)?;
    if !feedback.is_finite() || feedback < 0.0 {
        return Err(VoxError::invalid_parameter(
            "feedback",
            format!("must be a non-negative finite gain, got {}", feedback),
        ));
    }

    let mut output = buffer.clone();
    let len = buffer.len();

    for (out_channel, in_channel) in output.samples.iter_mut().zip(buffer.samples.iter()) {
        for i in delay_samples..len {
            out_channel[i] = in_channel[i] + feedback * in_channel[i - delay_samples];
        }
    }

    Ok(output)
}
