//! Voice Modulation Pipeline
//!
//! Chains the collaborator capabilities with the effects engine: translate
//! when the source language differs, synthesize speech, adjust tone with the
//! pitch shifter, and run captured audio through a requested effect.

use tracing::{debug, info};

use crate::dsp::{self, EffectRequest};
use crate::engine::AudioBuffer;
use crate::error::{Result, VoxError};
use crate::voice::{Recorder, Synthesizer, Translator};

/// Minimum speech rate in words per minute
const MIN_RATE_WPM: u32 = 40;

/// Maximum speech rate in words per minute
const MAX_RATE_WPM: u32 = 400;

/// Voice rendering settings shared with the synthesizer
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    /// Speech rate in words per minute
    pub rate_wpm: u32,
    /// Output volume (0.0 to 1.0)
    pub volume: f32,
    /// Tone as a pitch factor (1.0 = unchanged, 2.0 = octave up)
    pub pitch: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            rate_wpm: 150,
            volume: 1.0,
            pitch: 1.0,
        }
    }
}

/// Voice modulation pipeline over injected collaborators
///
/// Owns the voice settings the original system exposed (rate, volume, tone)
/// and a configured language; all audio transformation is delegated to the
/// pure effects engine.
pub struct VoiceModulator<S, T, R> {
    synthesizer: S,
    translator: T,
    recorder: R,
    settings: VoiceSettings,
    /// Language the pipeline speaks in (ISO 639-1 code)
    language: String,
}

impl<S: Synthesizer, T: Translator, R: Recorder> VoiceModulator<S, T, R> {
    /// Create a pipeline speaking the given language
    pub fn new(synthesizer: S, translator: T, recorder: R, language: impl Into<String>) -> Self {
        Self {
            synthesizer,
            translator,
            recorder,
            settings: VoiceSettings::default(),
            language: language.into(),
        }
    }

    /// Set the tone as a pitch factor (clamped to 0.25-4.0, two octaves)
    pub fn set_tone(&mut self, pitch: f32) {
        self.settings.pitch = pitch.clamp(0.25, 4.0);
    }

    /// Set the speech rate in words per minute (clamped to 40-400)
    pub fn set_speed(&mut self, rate_wpm: u32) {
        self.settings.rate_wpm = rate_wpm.clamp(MIN_RATE_WPM, MAX_RATE_WPM);
    }

    /// Set the output volume (clamped to 0-1)
    pub fn set_volume(&mut self, volume: f32) {
        self.settings.volume = volume.clamp(0.0, 1.0);
    }

    /// Current voice settings
    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    /// Language this pipeline speaks in
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Speak `text`, translating it first when `source_lang` differs from the
    /// pipeline language
    ///
    /// Returns the synthesized audio with the configured tone applied.
    pub fn text_to_speech(&self, text: &str, source_lang: Option<&str>) -> Result<AudioBuffer> {
        let spoken_text = match source_lang {
            Some(lang) if lang != self.language => {
                debug!(from = lang, to = %self.language, "translating before synthesis");
                self.translator.translate(text, lang, &self.language)?
            }
            _ => text.to_string(),
        };

        let audio = self.synthesizer.synthesize(&spoken_text, &self.settings)?;
        self.apply_tone(audio)
    }

    /// Translate `text` into `target_language` and speak the translation
    ///
    /// Returns the translated text along with the synthesized audio.
    pub fn translate_and_speak(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<(String, AudioBuffer)> {
        let translated = self
            .translator
            .translate(text, &self.language, target_language)?;
        info!(target = target_language, text = %translated, "translated text");

        let audio = self.synthesizer.synthesize(&translated, &self.settings)?;
        let audio = self.apply_tone(audio)?;
        Ok((translated, audio))
    }

    /// Capture audio from the recorder and run it through an optional effect
    pub fn record_with_effect(
        &self,
        duration_secs: f64,
        sample_rate: u32,
        effect: Option<&EffectRequest>,
    ) -> Result<AudioBuffer> {
        if duration_secs <= 0.0 || !duration_secs.is_finite() {
            return Err(VoxError::invalid_parameter(
                "duration_secs",
                format!("must be a positive duration, got {}", duration_secs),
            ));
        }

        info!(duration_secs, sample_rate, "recording");
        let captured = self.recorder.record(duration_secs, sample_rate)?;

        match effect {
            Some(request) => dsp::apply(request, &captured),
            None => Ok(captured),
        }
    }

    /// Apply the configured tone to synthesized audio
    ///
    /// A pitch factor of 1.0 is a no-op; otherwise the factor converts to
    /// semitone steps for the pitch shifter.
    fn apply_tone(&self, audio: AudioBuffer) -> Result<AudioBuffer> {
        if (self.settings.pitch - 1.0).abs() < f32::EPSILON {
            return Ok(audio);
        }
        let steps = 12.0 * self.settings.pitch.log2();
        dsp::pitch_shift(&audio, steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::EffectRequest;
    use crate::engine::buffer::DEFAULT_SAMPLE_RATE;
    use crate::voice::mock::{MockRecorder, MockSynthesizer, MockTranslator};

    fn build_modulator() -> VoiceModulator<MockSynthesizer, MockTranslator, MockRecorder> {
        VoiceModulator::new(
            MockSynthesizer::default(),
            MockTranslator::default(),
            MockRecorder::silence(),
            "es",
        )
    }

    #[test]
    fn test_settings_defaults() {
        let modulator = build_modulator();
        assert_eq!(modulator.settings().rate_wpm, 150);
        assert_eq!(modulator.settings().volume, 1.0);
        assert_eq!(modulator.settings().pitch, 1.0);
        assert_eq!(modulator.language(), "es");
    }

    #[test]
    fn test_setters_clamp() {
        let mut modulator = build_modulator();

        modulator.set_speed(10);
        assert_eq!(modulator.settings().rate_wpm, MIN_RATE_WPM);
        modulator.set_speed(1000);
        assert_eq!(modulator.settings().rate_wpm, MAX_RATE_WPM);

        modulator.set_volume(1.5);
        assert_eq!(modulator.settings().volume, 1.0);

        modulator.set_tone(10.0);
        assert_eq!(modulator.settings().pitch, 4.0);
    }

    #[test]
    fn test_text_to_speech_same_language_skips_translation() {
        let modulator = build_modulator();
        let audio = modulator.text_to_speech("Hola, soy Leila", Some("es")).unwrap();
        assert!(!audio.is_empty());
    }

    #[test]
    fn test_text_to_speech_translates_foreign_text() {
        let modulator = build_modulator();
        // "en" -> "es" is a supported pair in the mock
        let audio = modulator.text_to_speech("Hello", Some("en")).unwrap();
        assert!(!audio.is_empty());
    }

    #[test]
    fn test_translate_and_speak_returns_translation() {
        let modulator = build_modulator();
        let (text, audio) = modulator.translate_and_speak("Hola", "en").unwrap();
        assert!(text.contains("[en]"));
        assert!(!audio.is_empty());
    }

    #[test]
    fn test_translate_and_speak_unsupported_pair() {
        let modulator = build_modulator();
        let result = modulator.translate_and_speak("Hola", "zz");
        assert!(matches!(result, Err(VoxError::Translation { .. })));
    }

    #[test]
    fn test_tone_changes_synthesized_audio() {
        let mut modulator = build_modulator();
        let plain = modulator.text_to_speech("Hola", None).unwrap();

        modulator.set_tone(1.2);
        let toned = modulator.text_to_speech("Hola", None).unwrap();

        assert_eq!(plain.len(), toned.len());
        assert_ne!(plain.samples[0], toned.samples[0]);
    }

    #[test]
    fn test_record_with_effect_applies_effect() {
        let modulator = VoiceModulator::new(
            MockSynthesizer::default(),
            MockTranslator::default(),
            MockRecorder::tone(440.0),
            "es",
        );

        let raw = modulator
            .record_with_effect(0.5, DEFAULT_SAMPLE_RATE, None)
            .unwrap();
        let clipped = modulator
            .record_with_effect(
                0.5,
                DEFAULT_SAMPLE_RATE,
                Some(&EffectRequest::Distortion {
                    gain: 3.0,
                    clip: 1.0,
                }),
            )
            .unwrap();

        assert_eq!(raw.len(), clipped.len());
        assert!(clipped.samples[0].iter().any(|&s| s.abs() == 1.0));
    }

    #[test]
    fn test_record_with_effect_smoothed_silence_stays_silent() {
        let modulator = build_modulator();
        let output = modulator
            .record_with_effect(
                1.0,
                DEFAULT_SAMPLE_RATE,
                Some(&EffectRequest::Smoothing {
                    kernel_length: 1000,
                }),
            )
            .unwrap();
        assert!(output.samples.iter().flatten().all(|&s| s == 0.0));
    }

    #[test]
    fn test_record_rejects_bad_duration() {
        let modulator = build_modulator();
        assert!(modulator
            .record_with_effect(0.0, DEFAULT_SAMPLE_RATE, None)
            .is_err());
        assert!(modulator
            .record_with_effect(-1.0, DEFAULT_SAMPLE_RATE, None)
            .is_err());
    }
}
