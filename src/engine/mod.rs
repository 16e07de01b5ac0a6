//! Audio Engine
//!
//! Core buffer type and file I/O shared by the effects engine and the voice
//! pipeline.

pub mod buffer;
pub mod io;

pub use buffer::{AudioBuffer, ChannelLayout, DEFAULT_SAMPLE_RATE};
pub use io::{export_audio, generate_test_tone, import_audio, ExportFormat};
