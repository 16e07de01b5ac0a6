//! Voice Collaborator Capabilities
//!
//! The effects engine only consumes and produces [`AudioBuffer`]s; speech
//! synthesis, translation, and device capture are external collaborators
//! behind narrow capability traits. Implementations are injected into the
//! [`VoiceModulator`] pipeline, never reached through globals, so the whole
//! pipeline is testable with the in-memory mocks in [`mock`].

pub mod mock;
mod pipeline;

pub use pipeline::{VoiceModulator, VoiceSettings};

use crate::engine::AudioBuffer;
use crate::error::Result;

/// Text-to-speech synthesis capability
pub trait Synthesizer {
    /// Render `text` as spoken audio using the given voice settings
    fn synthesize(&self, text: &str, settings: &VoiceSettings) -> Result<AudioBuffer>;
}

/// Text translation capability
pub trait Translator {
    /// Translate `text` from `source` to `target` language code
    ///
    /// Fails with `Translation` for an unsupported language pair.
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// Device audio capture capability
pub trait Recorder {
    /// Capture `duration_secs` of audio at `sample_rate`
    fn record(&self, duration_secs: f64, sample_rate: u32) -> Result<AudioBuffer>;
}
