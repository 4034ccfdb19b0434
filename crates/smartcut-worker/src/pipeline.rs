//! Batch analysis pipeline.
//!
//! Fans one analysis task out per source under a concurrency bound,
//! collects the scored segments, then runs the global selection and
//! transition-planning steps exactly once over the combined pool.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use smartcut_engine::{
    DetectionConfig, EngineError, EngineResult, FeatureCache, NoopCache, ScoringStrategy,
    SegmentSelector, TransitionPlanner, WeightedSumScorer,
};
use smartcut_models::{Segment, SelectionResult, TransitionPlan};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::SourceLogger;
use crate::metrics::{record_source_analyzed, record_source_discarded};
use crate::source_analysis::{analyze_source, SourceHandle};

/// Everything a render collaborator needs from one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightReport {
    /// All scored segments, in chronological order.
    pub segments: Vec<Segment>,

    /// The duration-bounded selection.
    pub selection: SelectionResult,

    /// One transition per boundary of the selected sequence.
    pub transitions: TransitionPlan,
}

/// Orchestrates analysis of a batch of sources into a [`HighlightReport`].
pub struct AnalysisPipeline {
    config: DetectionConfig,
    worker: WorkerConfig,
    scorer: Arc<dyn ScoringStrategy>,
    cache: Arc<dyn FeatureCache>,
}

impl AnalysisPipeline {
    /// Build a pipeline. Both configs are validated up front; no media
    /// is touched when either is invalid.
    pub fn new(config: DetectionConfig, worker: WorkerConfig) -> WorkerResult<Self> {
        config.validate()?;
        worker.validate().map_err(WorkerError::config_error)?;
        let scorer = WeightedSumScorer::new(config.weights.clone())?;
        Ok(Self {
            config,
            worker,
            scorer: Arc::new(scorer),
            cache: Arc::new(NoopCache),
        })
    }

    /// Replace the default no-op feature cache.
    pub fn with_cache(mut self, cache: Arc<dyn FeatureCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the default weighted-sum scorer.
    pub fn with_scorer(mut self, scorer: Arc<dyn ScoringStrategy>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Analyze every source and produce the selection.
    ///
    /// Sources run in parallel, bounded by
    /// `WorkerConfig::max_concurrent_sources`. A cancelled or failed
    /// source is discarded whole; the batch continues with the rest.
    /// Fails with [`WorkerError::NoUsableContent`] when no source
    /// yields a single scored segment.
    pub async fn run(&self, sources: Vec<SourceHandle>) -> WorkerResult<HighlightReport> {
        let run_id = Uuid::new_v4();
        info!(%run_id, sources = sources.len(), "starting analysis run");

        let semaphore = Arc::new(Semaphore::new(self.worker.max_concurrent_sources));
        let mut tasks = Vec::with_capacity(sources.len());

        for (source_index, source) in sources.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let config = self.config.clone();
            let scorer = Arc::clone(&self.scorer);
            let cache = Arc::clone(&self.cache);
            let timeout = self.worker.source_timeout;
            let cancel_rx = source.cancel_rx();
            let logger = SourceLogger::new(&run_id, source.id.as_str());
            let span = logger.create_span();

            tasks.push(tokio::spawn(
                async move {
                    let outcome = analyze_one(
                        semaphore,
                        source_index,
                        &source,
                        &config,
                        scorer.as_ref(),
                        cache.as_ref(),
                        &cancel_rx,
                        &logger,
                        timeout,
                    )
                    .await;
                    (source_index, source.id.clone(), outcome)
                }
                .instrument(span),
            ));
        }

        let mut segments = Vec::new();
        for joined in join_all(tasks).await {
            let (_, source_id, outcome) = joined?;
            match outcome {
                Ok(scored) => segments.extend(scored),
                Err(EngineError::Cancelled) => {
                    warn!(source_id = %source_id, "source cancelled");
                    record_source_discarded(source_id.as_str(), "cancelled");
                }
                Err(err) => {
                    warn!(source_id = %source_id, error = %err, "source discarded");
                    record_source_discarded(source_id.as_str(), "failed");
                }
            }
        }

        if segments.is_empty() {
            return Err(WorkerError::NoUsableContent);
        }

        // Completion order of the tasks must not leak into the output.
        segments.sort_by(|a, b| {
            a.chronological_key()
                .partial_cmp(&b.chronological_key())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let selection = SegmentSelector::from_config(&self.config).select(&segments);
        let transitions = TransitionPlanner::from_config(&self.config).plan(&selection);

        info!(
            %run_id,
            scored = segments.len(),
            selected = selection.segment_count(),
            total_duration = selection.total_duration,
            "analysis run complete"
        );

        Ok(HighlightReport {
            segments,
            selection,
            transitions,
        })
    }
}

/// One bounded, timed, cancellable source analysis.
#[allow(clippy::too_many_arguments)]
async fn analyze_one(
    semaphore: Arc<Semaphore>,
    source_index: usize,
    source: &SourceHandle,
    config: &DetectionConfig,
    scorer: &dyn ScoringStrategy,
    cache: &dyn FeatureCache,
    cancel_rx: &tokio::sync::watch::Receiver<bool>,
    logger: &SourceLogger,
    timeout: std::time::Duration,
) -> EngineResult<Vec<Segment>> {
    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|e| EngineError::internal(format!("semaphore closed: {e}")))?;

    let started = Instant::now();
    let analysis = analyze_source(
        source_index,
        &source.id,
        source.media.as_ref(),
        config,
        scorer,
        cache,
        cancel_rx,
        logger,
    );

    let segments = match tokio::time::timeout(timeout, analysis).await {
        Ok(result) => result?,
        Err(_) => {
            logger.log_error("analysis timed out");
            return Err(EngineError::internal("source analysis timed out"));
        }
    };

    record_source_analyzed(
        source.id.as_str(),
        segments.len() as u64,
        started.elapsed().as_secs_f64(),
    );
    Ok(segments)
}
