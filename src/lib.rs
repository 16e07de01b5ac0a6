//! Voxmod - Voice Modulation Effects Engine
//!
//! Voxmod is a pure, stateless audio effects engine with the collaborator
//! seams of a voice modulation pipeline:
//! 1. Effects Engine - echo, distortion, robotic waveshaping, smoothing,
//!    and duration-preserving pitch shift over float sample buffers
//! 2. Voice Pipeline - speech synthesis, translation, and capture behind
//!    injectable capability traits
//!
//! # Architecture
//!
//! Every effect is a pure function from an [`engine::AudioBuffer`] to a new
//! buffer: no engine state, no in-place mutation, so concurrent calls on
//! independent buffers are safe. External services (TTS, translation, audio
//! devices) never appear in the engine; they live behind the [`voice`]
//! capability traits and are injected into the [`voice::VoiceModulator`]
//! pipeline.

pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod voice;

pub use error::{Result, VoxError};
