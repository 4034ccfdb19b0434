//! Pipeline metrics collection.
//!
//! Standardized metrics for monitoring analysis runs:
//! - Segment and failure counters per source
//! - Analysis latency histograms

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Segments scored, by source.
    pub const SEGMENTS_SCORED_TOTAL: &str = "smartcut_segments_scored_total";

    /// Segment windows skipped after extraction failure, by source.
    pub const EXTRACTION_FAILURES_TOTAL: &str = "smartcut_extraction_failures_total";

    /// Sources whose analysis was discarded (failure or cancellation).
    pub const SOURCES_DISCARDED_TOTAL: &str = "smartcut_sources_discarded_total";

    /// Per-source analysis duration in seconds.
    pub const ANALYSIS_SECONDS: &str = "smartcut_analysis_seconds";
}

/// Record a completed per-source analysis.
pub fn record_source_analyzed(source_id: &str, segments: u64, elapsed_secs: f64) {
    counter!(
        names::SEGMENTS_SCORED_TOTAL,
        "source" => source_id.to_string()
    )
    .increment(segments);

    histogram!(
        names::ANALYSIS_SECONDS,
        "source" => source_id.to_string()
    )
    .record(elapsed_secs);
}

/// Record a skipped segment window.
pub fn record_extraction_failure(source_id: &str) {
    counter!(
        names::EXTRACTION_FAILURES_TOTAL,
        "source" => source_id.to_string()
    )
    .increment(1);
}

/// Record a discarded source, tagged with the reason.
pub fn record_source_discarded(source_id: &str, reason: &str) {
    counter!(
        names::SOURCES_DISCARDED_TOTAL,
        "source" => source_id.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::SEGMENTS_SCORED_TOTAL.contains("segments"));
        assert!(names::EXTRACTION_FAILURES_TOTAL.contains("failures"));
        assert!(names::ANALYSIS_SECONDS.contains("seconds"));
    }
}
