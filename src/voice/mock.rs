//! Mock collaborators for testing
//!
//! Deterministic in-memory stand-ins for the external speech, translation,
//! and capture services, so the pipeline and effects engine can be exercised
//! without any device or network access.

use crate::engine::buffer::{AudioBuffer, ChannelLayout};
use crate::error::{Result, VoxError};
use crate::voice::{Recorder, Synthesizer, Translator, VoiceSettings};

/// Synthesizer producing a deterministic tone per input text
///
/// The tone frequency is derived from the text bytes and the duration from
/// the word count at the configured speech rate, so different texts and
/// settings yield audibly different buffers.
#[derive(Debug, Default, Clone)]
pub struct MockSynthesizer {
    /// Sample rate of generated speech (0 = default 44.1kHz)
    pub sample_rate: u32,
}

impl Synthesizer for MockSynthesizer {
    fn synthesize(&self, text: &str, settings: &VoiceSettings) -> Result<AudioBuffer> {
        if text.trim().is_empty() {
            return Err(VoxError::Synthesis {
                reason: "cannot synthesize empty text".to_string(),
            });
        }

        let sample_rate = if self.sample_rate == 0 {
            crate::engine::DEFAULT_SAMPLE_RATE
        } else {
            self.sample_rate
        };

        // One "word" takes 60/rate seconds
        let words = text.split_whitespace().count().max(1);
        let duration_secs = words as f64 * 60.0 / settings.rate_wpm as f64;
        let num_samples = ((duration_secs * sample_rate as f64).round() as usize).max(1);

        // Map text to a stable voice frequency in the speech band
        let seed: u32 = text.bytes().map(u32::from).sum();
        let frequency = 110.0 + (seed % 220) as f32;

        let mut buffer = AudioBuffer::new(num_samples, ChannelLayout::Mono, sample_rate);
        let angular_freq = std::f32::consts::TAU * frequency / sample_rate as f32;
        for (i, sample) in buffer.samples[0].iter_mut().enumerate() {
            *sample = settings.volume * 0.5 * (angular_freq * i as f32).sin();
        }

        Ok(buffer)
    }
}

/// Translator supporting a fixed set of language pairs
///
/// Translations are tagged rather than real: "hola" from es to en becomes
/// "[en] hola". Unsupported pairs fail the way a real service would.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    supported: Vec<&'static str>,
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self {
            supported: vec!["es", "en", "fr", "de"],
        }
    }
}

impl Translator for MockTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        if !self.supported.contains(&source) || !self.supported.contains(&target) {
            return Err(VoxError::Translation {
                reason: format!("unsupported language pair {} -> {}", source, target),
            });
        }
        if source == target {
            return Ok(text.to_string());
        }
        Ok(format!("[{}] {}", target, text))
    }
}

/// Recorder producing synthetic stereo captures
#[derive(Debug, Clone)]
pub struct MockRecorder {
    /// Tone frequency; None captures silence
    frequency: Option<f32>,
}

impl MockRecorder {
    /// Recorder that captures silence
    pub fn silence() -> Self {
        Self { frequency: None }
    }

    /// Recorder that captures a stereo test tone
    pub fn tone(frequency: f32) -> Self {
        Self {
            frequency: Some(frequency),
        }
    }
}

impl Recorder for MockRecorder {
    fn record(&self, duration_secs: f64, sample_rate: u32) -> Result<AudioBuffer> {
        if sample_rate == 0 {
            return Err(VoxError::Capture {
                reason: "sample rate must be greater than zero".to_string(),
            });
        }

        let num_samples = (duration_secs * sample_rate as f64) as usize;
        let mut buffer = AudioBuffer::new(num_samples, ChannelLayout::Stereo, sample_rate);

        if let Some(frequency) = self.frequency {
            let angular_freq = std::f32::consts::TAU * frequency / sample_rate as f32;
            for channel in &mut buffer.samples {
                for (i, sample) in channel.iter_mut().enumerate() {
                    *sample = (angular_freq * i as f32).sin();
                }
            }
        }

        Ok(buffer)
    }
}
