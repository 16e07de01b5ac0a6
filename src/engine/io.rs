//! Audio file I/O for Voxmod
//!
//! WAV decode/encode through `hound`. Files are imported at their native
//! sample rate; the effects engine is rate-agnostic so no resampling happens
//! here.
//!
//! Export to 16-bit PCM follows the mandatory encoding contract: clamp each
//! sample to [-1.0, 1.0], scale by 32767 and saturate. Echo mixing can push
//! samples past unity, so the clamp happens here regardless of whether the
//! effect itself clips.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

use crate::engine::buffer::{AudioBuffer, ChannelLayout};
use crate::error::{Result, VoxError};

/// Export format configuration
#[derive(Debug, Clone, Copy)]
pub struct ExportFormat {
    /// Bit depth: 16 (PCM) or 32 (float)
    pub bit_depth: u16,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat { bit_depth: 16 }
    }
}

impl ExportFormat {
    /// 16-bit PCM, the format the original pipeline wrote
    pub fn pcm16() -> Self {
        ExportFormat { bit_depth: 16 }
    }

    /// 32-bit float, lossless for internal samples already in range
    pub fn float32() -> Self {
        ExportFormat { bit_depth: 32 }
    }
}

/// Import a WAV file as an AudioBuffer at its native sample rate
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If the file is not a valid WAV file
/// * `UnsupportedFormat` - For unsupported bit depths
/// * `EmptyBuffer` - If the file decodes to zero samples
pub fn import_audio(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(VoxError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    let reader = WavReader::open(path).map_err(|e| VoxError::InvalidAudio {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;
    let channels = spec.channels as usize;

    let samples_f32 = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;

    let buffer = AudioBuffer::from_interleaved(&samples_f32, channels, sample_rate)?;
    if buffer.is_empty() {
        return Err(VoxError::EmptyBuffer);
    }

    debug!(
        path = %path.display(),
        sample_rate,
        channels,
        samples = buffer.len(),
        "imported audio"
    );

    Ok(buffer)
}

/// Export an AudioBuffer to a WAV file
///
/// For 16-bit output every sample is clamped to [-1.0, 1.0] before being
/// scaled to the signed 16-bit range, so out-of-range effect output saturates
/// instead of wrapping around.
pub fn export_audio(buffer: &AudioBuffer, path: &Path, format: ExportFormat) -> Result<()> {
    let spec = WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: format.bit_depth,
        sample_format: if format.bit_depth == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };

    let mut writer = WavWriter::create(path, spec).map_err(wav_io_error)?;

    let interleaved = buffer.to_interleaved();
    match format.bit_depth {
        16 => {
            for sample in interleaved {
                let quantized = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
                writer.write_sample(quantized).map_err(wav_io_error)?;
            }
        }
        32 => {
            for sample in interleaved {
                writer.write_sample(sample).map_err(wav_io_error)?;
            }
        }
        _ => {
            return Err(VoxError::UnsupportedFormat {
                format: format!("{}-bit audio (only 16, 32 supported)", format.bit_depth),
            });
        }
    }

    writer.finalize().map_err(wav_io_error)?;

    debug!(path = %path.display(), "exported audio");
    Ok(())
}

fn wav_io_error(e: hound::Error) -> VoxError {
    VoxError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}

/// Generate a mono test tone (sine wave)
pub fn generate_test_tone(frequency: f32, duration_secs: f32, sample_rate: u32) -> AudioBuffer {
    let num_samples = (duration_secs * sample_rate as f32) as usize;
    let mut buffer = AudioBuffer::new(num_samples, ChannelLayout::Mono, sample_rate);

    let angular_freq = 2.0 * std::f32::consts::PI * frequency / sample_rate as f32;
    for (i, sample) in buffer.samples[0].iter_mut().enumerate() {
        *sample = (angular_freq * i as f32).sin();
    }

    buffer
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Read samples from WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| VoxError::InvalidAudio {
                reason: format!("Failed to read float samples: {}", e),
                source: Some(Box::new(e)),
            }),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / 128.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| VoxError::InvalidAudio {
                    reason: format!("Failed to read 8-bit samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / 32768.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| VoxError::InvalidAudio {
                    reason: format!("Failed to read 16-bit samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            24 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 8388608.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| VoxError::InvalidAudio {
                    reason: format!("Failed to read 24-bit samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 2147483648.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| VoxError::InvalidAudio {
                    reason: format!("Failed to read 32-bit int samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            _ => Err(VoxError::UnsupportedFormat {
                format: format!("{}-bit integer audio", bits_per_sample),
            }),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
