//! Smoothing Convolution
//!
//! Same-length (centered) convolution with a uniform averaging kernel, a
//! moving-average low-pass filter. The original pipeline shipped this under
//! the name "reverb"; the behavior is kept as-is, under an honest name. It is
//! a deliberate simplification, not room-impulse reverberation.

use crate::dsp::validate_sample_rate;
use crate::engine::AudioBuffer;
use crate::error::{Result, VoxError};

/// Apply a uniform moving-average smoothing filter
///
/// Convolves each channel with a kernel of `kernel_length` weights, each
/// 1/`kernel_length`, in centered "same" mode: output length equals input
/// length, and the kernel window for output sample `i` is centered on `i`
/// (biased one sample left for even lengths).
///
/// # Errors
/// `InvalidParameter` if `kernel_length` is zero or the sample rate is zero.
pub fn smoothing(buffer: &AudioBuffer, kernel_length: usize) -> Result<AudioBuffer> {
    validate_sample_rate(buffer)?;
    if kernel_length == 0 {
        return Err(VoxError::invalid_parameter(
            "kernel_length",
            "must be at least 1",
        ));
    }

    let len = buffer.len();
    let weight = 1.0 / kernel_length as f32;
    // Centered "same" mode offset: the full convolution is trimmed starting
    // at (kernel_length - 1) / 2.
    let offset = (kernel_length - 1) / 2;

    let mut output = buffer.clone();
    for (out_channel, in_channel) in output.samples.iter_mut().zip(buffer.samples.iter()) {
        // Prefix sums make each window a constant-time lookup.
        let mut prefix = Vec::with_capacity(len + 1);
        prefix.push(0.0_f64);
        let mut acc = 0.0_f64;
        for &s in in_channel.iter() {
            acc += s as f64;
            prefix.push(acc);
        }

        for i in 0..len {
            let hi = (i + offset).min(len - 1);
            let lo = (i + offset).saturating_sub(kernel_length - 1);
            let window_sum = prefix[hi + 1] - prefix[lo];
            out_channel[i] = (window_sum * weight as f64) as f32;
        }
    }

    Ok(output)
}
