//! Per-source segmentation, extraction and scoring.
//!
//! One analysis task per source media item. Tasks are independent: an
//! aborted or failed source discards its partial segments wholesale and
//! never affects the rest of the batch.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use smartcut_engine::{
    cache_key, AudioFeatureExtractor, DetectionConfig, EngineError, EngineResult, FeatureCache,
    MediaSource, ScoringStrategy, TimeWindow, VideoFeatureExtractor, EXTRACTOR_VERSION,
};
use smartcut_engine::cache::CachedFeatures;
use smartcut_models::{Segment, SourceId};

use crate::logging::SourceLogger;
use crate::metrics::record_extraction_failure;

/// One source media item queued for analysis, with its abort channel.
pub struct SourceHandle {
    pub id: SourceId,
    pub media: Arc<dyn MediaSource>,
    cancel_rx: watch::Receiver<bool>,
}

/// Aborts the analysis of a single source; other sources continue.
#[derive(Clone)]
pub struct SourceCancelHandle {
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl SourceCancelHandle {
    /// Request cancellation. Partial results for the source are
    /// discarded, not partially admitted.
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }
}

impl SourceHandle {
    /// Create a handle plus its cancellation counterpart.
    pub fn new(id: SourceId, media: Arc<dyn MediaSource>) -> (Self, SourceCancelHandle) {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        (
            Self {
                id,
                media,
                cancel_rx,
            },
            SourceCancelHandle {
                cancel_tx: Arc::new(cancel_tx),
            },
        )
    }

    /// Create a handle with no external cancellation.
    pub fn uncancellable(id: SourceId, media: Arc<dyn MediaSource>) -> Self {
        Self::new(id, media).0
    }

    pub(crate) fn cancel_rx(&self) -> watch::Receiver<bool> {
        self.cancel_rx.clone()
    }
}

/// Analyze one source: split into fixed windows, extract features,
/// score each window.
///
/// Per-window extraction failures are isolated: the window is skipped
/// with a warning and the source continues. Cancellation aborts the
/// whole source with `EngineError::Cancelled`.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn analyze_source(
    source_index: usize,
    id: &SourceId,
    media: &dyn MediaSource,
    config: &DetectionConfig,
    scorer: &dyn ScoringStrategy,
    cache: &dyn FeatureCache,
    cancel_rx: &watch::Receiver<bool>,
    logger: &SourceLogger,
) -> EngineResult<Vec<Segment>> {
    let total_duration = media.duration().await?;
    if total_duration <= 0.0 {
        return Err(EngineError::EmptySource(id.to_string()));
    }

    let num_segments = (total_duration / config.segment_duration).ceil() as usize;
    logger.log_start(&format!(
        "{total_duration:.1}s of content, {num_segments} windows"
    ));

    let audio_extractor = AudioFeatureExtractor::new(config.silence_threshold_db);
    let video_extractor = VideoFeatureExtractor::new(config.scene_change_threshold);

    let mut segments = Vec::with_capacity(num_segments);
    for i in 0..num_segments {
        if *cancel_rx.borrow() {
            logger.log_warning("cancelled, discarding partial results");
            return Err(EngineError::Cancelled);
        }

        if i > 0 && i % 30 == 0 {
            logger.log_progress(&format!("{i}/{num_segments} windows"));
        }

        let start = i as f64 * config.segment_duration;
        let end = (start + config.segment_duration).min(total_duration);
        let window = TimeWindow::new(start, end);

        let features = match cached_or_extract(
            id,
            media,
            window,
            &audio_extractor,
            &video_extractor,
            cache,
        )
        .await
        {
            Ok(features) => features,
            Err(err) if err.is_recoverable() => {
                warn!(source_id = %id, start, end, error = %err, "skipping window");
                record_extraction_failure(id.as_str());
                continue;
            }
            Err(err) => return Err(err),
        };

        let time_position = window.midpoint() / total_duration;
        let score = scorer.score(&features.audio, &features.video, time_position);

        segments.push(Segment::new(
            source_index,
            id.clone(),
            start,
            end,
            features.audio,
            features.video,
            score,
        ));
    }

    logger.log_completion(&format!("{} windows scored", segments.len()));
    Ok(segments)
}

/// Look up the window in the feature cache, extracting on miss.
async fn cached_or_extract(
    id: &SourceId,
    media: &dyn MediaSource,
    window: TimeWindow,
    audio_extractor: &AudioFeatureExtractor,
    video_extractor: &VideoFeatureExtractor,
    cache: &dyn FeatureCache,
) -> EngineResult<CachedFeatures> {
    let key = cache_key(id, window, EXTRACTOR_VERSION);
    if let Some(hit) = cache.get(&key) {
        return Ok(hit);
    }

    let waveform = media.audio_window(window).await.map_err(|e| {
        EngineError::extraction_failed(id.as_str(), window.start, window.end, e.to_string())
    })?;
    let frames = media.video_frames(window).await.map_err(|e| {
        EngineError::extraction_failed(id.as_str(), window.start, window.end, e.to_string())
    })?;

    let features = CachedFeatures {
        audio: audio_extractor.extract(&waveform),
        video: video_extractor.extract(&frames),
    };
    cache.put(&key, features);
    Ok(features)
}
