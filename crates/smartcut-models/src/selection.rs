//! Selection result model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// Ordered, non-overlapping highlight selection for one batch.
///
/// Segments are sorted by `(source_index, start_time)`; chronology is
/// never reordered for narrative effect. Infeasible duration bounds are
/// reported as flags rather than errors so downstream collaborators
/// always receive a best-effort reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionResult {
    /// Selected segments in chronological order. Mutually adjacent
    /// admissions are already merged into continuous runs.
    pub segments: Vec<Segment>,

    /// Sum of selected segment durations in seconds.
    pub total_duration: f64,

    /// Mean interest score of the selected segments (0.0 when empty).
    pub average_score: f64,

    /// Set when the total available content could not reach `target_min`.
    pub under_target: bool,

    /// Set when a single indivisible segment alone exceeds `target_max`.
    pub over_target: bool,
}

impl SelectionResult {
    /// Build a result from chronologically ordered segments, computing
    /// the duration and score aggregates.
    pub fn from_segments(segments: Vec<Segment>, under_target: bool, over_target: bool) -> Self {
        let total_duration = segments.iter().map(Segment::duration).sum();
        let average_score = if segments.is_empty() {
            0.0
        } else {
            segments.iter().map(|s| s.interest_score).sum::<f64>() / segments.len() as f64
        };
        Self {
            segments,
            total_duration,
            average_score,
            under_target,
            over_target,
        }
    }

    /// An empty selection, flagged under-target.
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            total_duration: 0.0,
            average_score: 0.0,
            under_target: true,
            over_target: false,
        }
    }

    /// Number of selected segments/runs.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Time ranges `(start, end)` for the render collaborator's cut list.
    pub fn time_ranges(&self) -> Vec<(f64, f64)> {
        self.segments
            .iter()
            .map(|s| (s.start_time, s.end_time))
            .collect()
    }
}
