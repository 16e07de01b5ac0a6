//! Pitch Shift Effect
//!
//! Duration-preserving pitch shift parameterized in semitone steps. The
//! buffer is time-stretched by 2^(steps/12) with a phase vocoder, then
//! resampled back to the exact input length, so the perceived pitch moves
//! while the duration stays fixed.
//!
//! Fractional and negative steps are both supported; zero steps returns the
//! input unchanged.

use rustfft::{num_complex::Complex, FftPlanner};
use tracing::debug;

use crate::dsp::validate_sample_rate;
use crate::engine::AudioBuffer;
use crate::error::{Result, VoxError};

/// Largest FFT frame used by the vocoder
const MAX_FFT_SIZE: usize = 2048;

/// Below this frame size the vocoder has too few bins to be useful;
/// shorter inputs fall back to plain resampling
const MIN_FFT_SIZE: usize = 64;

/// Window-sum floor for overlap-add normalization
const WINDOW_SUM_EPS: f32 = 1e-6;

/// Shift the buffer's pitch by `shift_steps` semitones, preserving duration
///
/// Positive steps raise the pitch, negative steps lower it; values may be
/// fractional. The output length always equals the input length exactly.
///
/// # Errors
/// * `EmptyBuffer` - if the buffer has no samples
/// * `InvalidParameter` - if `shift_steps` is not finite or the sample rate
///   is zero
pub fn pitch_shift(buffer: &AudioBuffer, shift_steps: f32) -> Result<AudioBuffer> {
    validate_sample_rate(buffer)?;
    if !shift_steps.is_finite() {
        return Err(VoxError::invalid_parameter(
            "shift_steps",
            format!("must be finite, got {}", shift_steps),
        ));
    }
    if buffer.is_empty() {
        return Err(VoxError::EmptyBuffer);
    }
    if shift_steps == 0.0 {
        return Ok(buffer.clone());
    }

    let factor = 2.0_f64.powf(shift_steps as f64 / 12.0);
    debug!(shift_steps, factor, "pitch shifting");

    let mut output = buffer.clone();
    for (out_channel, in_channel) in output.samples.iter_mut().zip(buffer.samples.iter()) {
        let stretched = time_stretch(in_channel, factor);
        *out_channel = resample_to_len(&stretched, in_channel.len());
    }

    Ok(output)
}

/// Time-stretch a channel by `ratio` using a phase vocoder
///
/// Output length is round(len × ratio). Analysis frames are taken at hop
/// `hop_synth / ratio` and re-laid at `hop_synth`, with per-bin phase
/// accumulation from the estimated instantaneous frequency. Overlap-add is
/// normalized by the accumulated squared window, as usual.
fn time_stretch(input: &[f32], ratio: f64) -> Vec<f32> {
    let out_len = ((input.len() as f64 * ratio).round() as usize).max(1);

    let fft_size = largest_power_of_two_leq(input.len().min(MAX_FFT_SIZE));
    if fft_size < MIN_FFT_SIZE {
        // Too short to frame; plain resampling changes pitch along with
        // duration, which the caller's resample back mostly undoes.
        return resample_to_len(input, out_len);
    }

    let hop_synth = fft_size / 4;
    let hop_analysis = hop_synth as f64 / ratio;
    let num_bins = fft_size / 2 + 1;

    let window = hann_window(fft_size);
    let mut planner = FftPlanner::new();
    let fft_forward = planner.plan_fft_forward(fft_size);
    let fft_inverse = planner.plan_fft_inverse(fft_size);
    let mut fwd_scratch = vec![Complex::new(0.0, 0.0); fft_forward.get_inplace_scratch_len()];
    let mut inv_scratch = vec![Complex::new(0.0, 0.0); fft_inverse.get_inplace_scratch_len()];

    let mut spectrum = vec![Complex::new(0.0_f32, 0.0_f32); fft_size];
    let mut prev_phase = vec![0.0_f32; num_bins];
    let mut synth_phase = vec![0.0_f32; num_bins];

    let mut ola = vec![0.0_f32; out_len + fft_size];
    let mut window_sum = vec![0.0_f32; out_len + fft_size];
    let inv_fft = 1.0 / fft_size as f32;
    let two_pi = std::f32::consts::TAU;

    let num_frames = out_len.div_ceil(hop_synth);
    let mut prev_analysis_pos = 0usize;

    for frame in 0..num_frames {
        let analysis_pos = (frame as f64 * hop_analysis).round() as usize;

        for i in 0..fft_size {
            let sample = input.get(analysis_pos + i).copied().unwrap_or(0.0);
            spectrum[i] = Complex::new(sample * window[i], 0.0);
        }
        fft_forward.process_with_scratch(&mut spectrum, &mut fwd_scratch);

        // The integer hop actually taken this frame; rounding the analysis
        // position makes it vary by ±1 around hop_analysis.
        let hop_actual = (analysis_pos - prev_analysis_pos).max(1) as f32;
        prev_analysis_pos = analysis_pos;

        for (k, (prev, synth)) in prev_phase
            .iter_mut()
            .zip(synth_phase.iter_mut())
            .enumerate()
            .take(num_bins)
        {
            let magnitude = spectrum[k].norm();
            let phase = spectrum[k].arg();
            let omega = two_pi * k as f32 / fft_size as f32;

            if frame == 0 {
                *synth = phase;
            } else {
                let delta = princarg(phase - *prev - omega * hop_actual);
                let instantaneous = omega + delta / hop_actual;
                *synth += instantaneous * hop_synth as f32;
            }
            *prev = phase;

            spectrum[k] = Complex::from_polar(magnitude, *synth);
        }
        // Restore conjugate symmetry so the inverse transform is real
        for k in 1..fft_size - num_bins + 1 {
            spectrum[fft_size - k] = spectrum[k].conj();
        }

        fft_inverse.process_with_scratch(&mut spectrum, &mut inv_scratch);

        let out_pos = frame * hop_synth;
        for i in 0..fft_size {
            let idx = out_pos + i;
            if idx >= ola.len() {
                break;
            }
            let win = window[i];
            ola[idx] += spectrum[i].re * inv_fft * win;
            window_sum[idx] += win * win;
        }
    }

    let mut output = vec![0.0_f32; out_len];
    for (i, out) in output.iter_mut().enumerate() {
        *out = if window_sum[i] > WINDOW_SUM_EPS {
            ola[i] / window_sum[i]
        } else {
            ola[i]
        };
    }
    output
}

/// Linear-interpolation resample to an exact target length
///
/// Endpoints map to endpoints, so the result has precisely `target_len`
/// samples regardless of the length ratio.
fn resample_to_len(samples: &[f32], target_len: usize) -> Vec<f32> {
    if target_len == 0 {
        return Vec::new();
    }
    if samples.is_empty() {
        return vec![0.0; target_len];
    }
    if samples.len() == 1 || target_len == 1 {
        return vec![samples[0]; target_len];
    }

    let step = (samples.len() - 1) as f64 / (target_len - 1) as f64;
    let mut output = Vec::with_capacity(target_len);
    for i in 0..target_len {
        let src_pos = i as f64 * step;
        let src_idx = src_pos.floor() as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        let sample = if src_idx + 1 < samples.len() {
            samples[src_idx] * (1.0 - frac) + samples[src_idx + 1] * frac
        } else {
            samples[src_idx]
        };
        output.push(sample);
    }
    output
}

/// Periodic Hann window
fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let x = std::f32::consts::TAU * i as f32 / size as f32;
            0.5 * (1.0 - x.cos())
        })
        .collect()
}

/// Wrap a phase value into (-pi, pi]
#[inline]
fn princarg(phase: f32) -> f32 {
    let two_pi = std::f32::consts::TAU;
    let wrapped = phase.rem_euclid(two_pi);
    if wrapped > std::f32::consts::PI {
        wrapped - two_pi
    } else {
        wrapped
    }
}

#[inline]
fn largest_power_of_two_leq(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    1usize << (usize::BITS as usize - 1 - n.leading_zeros() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::buffer::DEFAULT_SAMPLE_RATE;
    use crate::engine::generate_test_tone;

    /// Count positive-going zero crossings over the middle half of a signal,
    /// away from windowing artifacts at the edges.
    fn middle_crossings(samples: &[f32]) -> usize {
        let start = samples.len() / 4;
        let end = 3 * samples.len() / 4;
        samples[start..end]
            .windows(2)
            .filter(|w| w[0] <= 0.0 && w[1] > 0.0)
            .count()
    }

    #[test]
    fn test_pitch_shift_zero_steps_is_noop() {
        let buffer = generate_test_tone(440.0, 0.5, DEFAULT_SAMPLE_RATE);
        let output = pitch_shift(&buffer, 0.0).unwrap();

        assert_eq!(output.len(), buffer.len());
        for (a, b) in buffer.samples[0].iter().zip(output.samples[0].iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pitch_shift_preserves_length() {
        let buffer = generate_test_tone(440.0, 1.0, DEFAULT_SAMPLE_RATE);
        for steps in [-12.0_f32, -2.0, -0.5, 0.5, 2.0, 12.0] {
            let output = pitch_shift(&buffer, steps).unwrap();
            assert_eq!(
                output.len(),
                buffer.len(),
                "length changed at {} steps",
                steps
            );
            assert_eq!(output.sample_rate, buffer.sample_rate);
        }
    }

    #[test]
    fn test_pitch_shift_octave_up_doubles_frequency() {
        let buffer = generate_test_tone(440.0, 1.0, DEFAULT_SAMPLE_RATE);
        let output = pitch_shift(&buffer, 12.0).unwrap();

        let base = middle_crossings(&buffer.samples[0]);
        let shifted = middle_crossings(&output.samples[0]);
        let ratio = shifted as f64 / base as f64;
        assert!(
            (ratio - 2.0).abs() < 0.3,
            "expected ~2x crossings, got ratio {}",
            ratio
        );
    }

    #[test]
    fn test_pitch_shift_octave_down_halves_frequency() {
        let buffer = generate_test_tone(440.0, 1.0, DEFAULT_SAMPLE_RATE);
        let output = pitch_shift(&buffer, -12.0).unwrap();

        let base = middle_crossings(&buffer.samples[0]);
        let shifted = middle_crossings(&output.samples[0]);
        let ratio = shifted as f64 / base as f64;
        assert!(
            (ratio - 0.5).abs() < 0.1,
            "expected ~0.5x crossings, got ratio {}",
            ratio
        );
    }

    #[test]
    fn test_pitch_shift_output_is_finite_and_bounded() {
        let buffer = generate_test_tone(440.0, 0.5, DEFAULT_SAMPLE_RATE);
        let output = pitch_shift(&buffer, 3.5).unwrap();
        assert!(output.is_finite());
        // A unit sine should not blow up through the vocoder
        assert!(output.samples[0].iter().all(|&s| s.abs() < 2.0));
    }

    #[test]
    fn test_pitch_shift_empty_buffer_rejected() {
        let buffer = AudioBuffer::from_mono(vec![], DEFAULT_SAMPLE_RATE);
        let result = pitch_shift(&buffer, 2.0);
        assert!(matches!(result, Err(VoxError::EmptyBuffer)));
    }

    #[test]
    fn test_pitch_shift_non_finite_steps_rejected() {
        let buffer = generate_test_tone(440.0, 0.1, DEFAULT_SAMPLE_RATE);
        assert!(pitch_shift(&buffer, f32::NAN).is_err());
        assert!(pitch_shift(&buffer, f32::INFINITY).is_err());
    }

    #[test]
    fn test_pitch_shift_stereo_preserves_channels() {
        let tone = generate_test_tone(440.0, 0.5, DEFAULT_SAMPLE_RATE);
        let buffer = AudioBuffer {
            samples: vec![tone.samples[0].clone(), tone.samples[0].clone()],
            sample_rate: DEFAULT_SAMPLE_RATE,
        };
        let output = pitch_shift(&buffer, 2.0).unwrap();
        assert_eq!(output.num_channels(), 2);
        assert_eq!(output.len(), buffer.len());
        // Identical channels stay identical through a deterministic transform
        assert_eq!(output.samples[0], output.samples[1]);
    }

    #[test]
    fn test_pitch_shift_tiny_buffer_falls_back() {
        let buffer = AudioBuffer::from_mono(vec![0.1, 0.2, 0.3], DEFAULT_SAMPLE_RATE);
        let output = pitch_shift(&buffer, 2.0).unwrap();
        assert_eq!(output.len(), 3);
        assert!(output.is_finite());
    }

    #[test]
    fn test_resample_to_len_exact() {
        let samples = vec![0.0, 1.0, 0.0, -1.0, 0.0];
        assert_eq!(resample_to_len(&samples, 10).len(), 10);
        assert_eq!(resample_to_len(&samples, 3).len(), 3);
        assert_eq!(resample_to_len(&samples, 1).len(), 1);
    }

    #[test]
    fn test_resample_to_len_endpoints() {
        let samples = vec![0.25, 0.5, 0.75, 1.0];
        let resampled = resample_to_len(&samples, 7);
        assert!((resampled[0] - 0.25).abs() < 1e-6);
        assert!((resampled[6] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_princarg_range() {
        for phase in [-10.0_f32, -3.2, 0.0, 3.2, 10.0, 100.0] {
            let wrapped = princarg(phase);
            assert!(wrapped > -std::f32::consts::PI - 1e-6);
            assert!(wrapped <= std::f32::consts::PI + 1e-6);
        }
    }

    #[test]
    fn test_largest_power_of_two_leq() {
        assert_eq!(largest_power_of_two_leq(1), 1);
        assert_eq!(largest_power_of_two_leq(2048), 2048);
        assert_eq!(largest_power_of_two_leq(3000), 2048);
        assert_eq!(largest_power_of_two_leq(63), 32);
    }
}
