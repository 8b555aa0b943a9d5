//! Error handling for Cinesynth
//!
//! Synthesis itself has a single failure mode (`EngineUnavailable`); the
//! remaining variants belong to decoding and file output.

use thiserror::Error;

/// Result type alias for Cinesynth operations
pub type Result<T> = std::result::Result<T, SynthError>;

/// Main error type for Cinesynth operations
#[derive(Error, Debug)]
pub enum SynthError {
    // Rendering Errors
    #[error("Synthesis engine unavailable: {reason}")]
    EngineUnavailable { reason: String },

    // Decoding Errors
    #[error("Invalid audio: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SynthError {
    /// Shorthand for an `EngineUnavailable` error
    pub fn engine_unavailable(reason: impl Into<String>) -> Self {
        SynthError::EngineUnavailable {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SynthError::EngineUnavailable { .. } => "ENGINE_UNAVAILABLE",
            SynthError::InvalidAudio { .. } => "INVALID_AUDIO",
            SynthError::Io(_) => "IO_ERROR",
            SynthError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable by the caller
    ///
    /// `EngineUnavailable` is not retried here; the caller decides whether to
    /// fall back to silence, a cached asset, or a notification.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SynthError::InvalidAudio { .. } | SynthError::Io(_))
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            SynthError::EngineUnavailable { .. } => vec![
                "Fall back to a silent track or a cached asset",
                "Try a shorter duration to reduce memory use",
            ],
            SynthError::InvalidAudio { .. } => vec![
                "Check that the file is a 16-bit PCM WAV",
                "Re-generate the track and write it again",
            ],
            SynthError::Io(_) => vec![
                "Check the output directory exists and is writable",
                "Free up disk space",
            ],
            SynthError::Serialization(_) => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SynthError::engine_unavailable("no allocator");
        assert_eq!(err.error_code(), "ENGINE_UNAVAILABLE");
        assert_eq!(
            err.to_string(),
            "Synthesis engine unavailable: no allocator"
        );
    }

    #[test]
    fn test_engine_unavailable_not_recoverable() {
        let err = SynthError::engine_unavailable("x");
        assert!(!err.is_recoverable());
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SynthError = io.into();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(err.is_recoverable());
    }
}
