//! Error handling for Voxmod
//!
//! Every failure is reported synchronously to the caller; nothing is retried
//! or silently substituted with a default.

use thiserror::Error;

/// Result type alias for Voxmod operations
pub type Result<T> = std::result::Result<T, VoxError>;

/// Main error type for Voxmod operations
#[derive(Error, Debug)]
pub enum VoxError {
    // Effect parameter errors
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Audio buffer contains no samples")]
    EmptyBuffer,

    #[error("Unsupported channel layout: {details}")]
    UnsupportedChannelLayout { details: String },

    // File errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Collaborator errors
    #[error("Translation failed: {reason}")]
    Translation { reason: String },

    #[error("Speech synthesis failed: {reason}")]
    Synthesis { reason: String },

    #[error("Audio capture failed: {reason}")]
    Capture { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VoxError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            VoxError::InvalidParameter { .. } => "INVALID_PARAMETER",
            VoxError::EmptyBuffer => "EMPTY_BUFFER",
            VoxError::UnsupportedChannelLayout { .. } => "UNSUPPORTED_CHANNEL_LAYOUT",
            VoxError::FileNotFound { .. } => "FILE_NOT_FOUND",
            VoxError::InvalidAudio { .. } => "INVALID_AUDIO",
            VoxError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            VoxError::Translation { .. } => "TRANSLATION_ERROR",
            VoxError::Synthesis { .. } => "SYNTHESIS_ERROR",
            VoxError::Capture { .. } => "CAPTURE_ERROR",
            VoxError::Io(_) => "IO_ERROR",
            VoxError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Shorthand for an invalid-parameter error
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        VoxError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = VoxError::invalid_parameter("gain", "must be non-negative");
        assert_eq!(err.error_code(), "INVALID_PARAMETER");

        let err = VoxError::EmptyBuffer;
        assert_eq!(err.error_code(), "EMPTY_BUFFER");
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = VoxError::invalid_parameter("kernel_length", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'kernel_length': must be at least 1"
        );
    }
}
