//! Worker configuration.

use std::time::Duration;

/// Concurrency settings for the analysis pipeline.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Maximum sources analyzed in parallel.
    pub max_concurrent_sources: usize,
    /// Per-source analysis timeout.
    pub source_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_sources: 4,
            source_timeout: Duration::from_secs(600),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_concurrent_sources: std::env::var("SMARTCUT_MAX_SOURCES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
            source_timeout: Duration::from_secs(
                std::env::var("SMARTCUT_SOURCE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
        }
    }

    /// Reject degenerate settings before any work starts.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_sources == 0 {
            return Err("max_concurrent_sources must be at least 1".to_string());
        }
        if self.source_timeout.is_zero() {
            return Err("source_timeout must be positive".to_string());
        }
        Ok(())
    }
}
