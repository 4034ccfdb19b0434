//! Error types for the highlight engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during highlight detection.
///
/// Duration infeasibility is deliberately NOT an error: under/over-target
/// conditions are flags on the selection result so downstream always
/// receives a best-effort reel.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Extraction failed for {source_id} [{start:.2}s, {end:.2}s): {message}")]
    ExtractionFailed {
        source_id: String,
        start: f64,
        end: f64,
        message: String,
    },

    #[error("Source {0} has no usable duration")]
    EmptySource(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Create a fail-fast configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Create an extraction failure for one segment window.
    pub fn extraction_failed(
        source_id: impl Into<String>,
        start: f64,
        end: f64,
        message: impl Into<String>,
    ) -> Self {
        Self::ExtractionFailed {
            source_id: source_id.into(),
            start,
            end,
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Per-segment extraction failures are isolated and recovered; the
    /// segment is skipped and the batch continues.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::ExtractionFailed { .. })
    }
}
