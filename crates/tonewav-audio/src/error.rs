//! Error types for the audio backend.

use std::fmt;

use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Phase of a WAV render in which an I/O failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    /// Creating or opening the output sink.
    Open,
    /// Writing the RIFF header, `fmt ` chunk and `data` preamble.
    Header,
    /// Streaming encoded samples into the data region.
    Samples,
    /// Seeking back and overwriting the two size fields.
    Patch,
    /// Copying an in-memory render out to a non-seekable sink.
    Copy,
    /// Flushing and releasing the sink.
    Close,
}

impl WritePhase {
    /// Returns a short label used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            WritePhase::Open => "open",
            WritePhase::Header => "header write",
            WritePhase::Samples => "sample loop",
            WritePhase::Patch => "size patch",
            WritePhase::Copy => "buffer copy",
            WritePhase::Close => "close",
        }
    }
}

impl fmt::Display for WritePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during tone generation and WAV handling.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Invalid configuration parameter.
    #[error("invalid config '{field}': {message}")]
    Config {
        /// Offending field name.
        field: &'static str,
        /// Error message.
        message: String,
    },

    /// I/O error, tagged with the render phase that failed.
    #[error("I/O error during {phase}: {source}")]
    Io {
        /// Phase that was running when the error surfaced.
        phase: WritePhase,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writer operation called out of order.
    #[error("cannot {operation} while writer is {state}")]
    InvalidState {
        /// Operation that was attempted.
        operation: &'static str,
        /// State the writer was in.
        state: &'static str,
    },

    /// Malformed WAV header.
    #[error("invalid WAV header at offset {offset}: {message}")]
    InvalidHeader {
        /// Byte offset of the offending field.
        offset: usize,
        /// Error message.
        message: String,
    },
}

impl AudioError {
    /// Creates a configuration error.
    pub fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            field,
            message: message.into(),
        }
    }

    /// Creates an I/O error for the given phase.
    pub fn io(phase: WritePhase, source: std::io::Error) -> Self {
        Self::Io { phase, source }
    }

    /// Creates a header parse error.
    pub fn invalid_header(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            offset,
            message: message.into(),
        }
    }

    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::Config { .. } => "TONE_001",
            AudioError::Io { .. } => "TONE_002",
            AudioError::InvalidState { .. } => "TONE_003",
            AudioError::InvalidHeader { .. } => "TONE_004",
        }
    }

    /// Returns the failing phase for I/O errors.
    pub fn phase(&self) -> Option<WritePhase> {
        match self {
            AudioError::Io { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_helper() {
        let err = AudioError::config("bit_depth", "must be a multiple of 8");
        assert!(err.to_string().contains("bit_depth"));
        assert!(err.to_string().contains("multiple of 8"));
        assert_eq!(err.code(), "TONE_001");
        assert_eq!(err.phase(), None);
    }

    #[test]
    fn test_io_error_names_phase() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AudioError::io(WritePhase::Patch, source);
        assert_eq!(err.to_string(), "I/O error during size patch: denied");
        assert_eq!(err.phase(), Some(WritePhase::Patch));
        assert_eq!(err.code(), "TONE_002");
    }

    #[test]
    fn test_invalid_state_message() {
        let err = AudioError::InvalidState {
            operation: "write a sample",
            state: "closed",
        };
        assert_eq!(err.to_string(), "cannot write a sample while writer is closed");
    }
}
