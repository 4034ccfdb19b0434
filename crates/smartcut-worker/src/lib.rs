//! Parallel analysis worker.
//!
//! Runs the detection engine over a batch of source media items: one
//! bounded, cancellable task per source, then a single global selection
//! and transition-planning pass over the combined segment pool.

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod source_analysis;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::{init_logging, SourceLogger};
pub use pipeline::{AnalysisPipeline, HighlightReport};
pub use source_analysis::{SourceCancelHandle, SourceHandle};
