//! Tracing setup and per-source log context.

use tracing::{error, info, warn, Span};
use uuid::Uuid;

/// Install the global subscriber for worker binaries and tests.
///
/// `RUST_LOG` wins when set; otherwise `info` globally with `debug` for
/// the smartcut crates. Safe to call more than once.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,smartcut=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Log context for one source within an analysis run.
///
/// Parallel sources interleave their output, so every line carries both
/// identifiers. Cheap to clone into spawned tasks.
#[derive(Debug, Clone)]
pub struct SourceLogger {
    run_id: String,
    source_id: String,
}

impl SourceLogger {
    pub fn new(run_id: &Uuid, source_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            source_id: source_id.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            source_id = %self.source_id,
            "source analysis started, {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            source_id = %self.source_id,
            "analyzing, {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            source_id = %self.source_id,
            "{}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            source_id = %self.source_id,
            "{}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            source_id = %self.source_id,
            "source analysis finished, {}", message
        );
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Span wrapping the whole analysis task for this source.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "source_analysis",
            run_id = %self.run_id,
            source_id = %self.source_id
        )
    }
}
