//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No sources produced usable segments")]
    NoUsableContent,

    #[error("Engine error: {0}")]
    Engine(#[from] smartcut_engine::EngineError),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn analysis_failed(msg: impl Into<String>) -> Self {
        Self::AnalysisFailed(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Configuration errors are fatal and reported immediately; a source
    /// that fails analysis is skipped and the batch continues.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WorkerError::ConfigError(_) | WorkerError::Engine(
            smartcut_engine::EngineError::InvalidConfiguration(_)
        ))
    }
}
