//! Scored segment model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::features::{clamp_unit, AudioFeatures, VideoFeatures};

/// Identifier of a source media item.
///
/// Opaque to the engine; collaborators typically use a file path or a
/// database key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A scored, half-open time window `[start_time, end_time)` of one source.
///
/// Segments are created once per analysis run, scored once, and never
/// mutated afterwards. The selector consumes them by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Position of the source in the batch; first key of chronological order.
    pub source_index: usize,

    /// Source media item this segment belongs to.
    pub source_id: SourceId,

    /// Start of the window in seconds (inclusive).
    pub start_time: f64,

    /// End of the window in seconds (exclusive).
    pub end_time: f64,

    /// Audio feature breakdown, kept for the UI collaborator.
    pub audio_features: AudioFeatures,

    /// Video feature breakdown, kept for the UI collaborator.
    pub video_features: VideoFeatures,

    /// Composite interest score in `[0, 1]`.
    pub interest_score: f64,
}

impl Segment {
    /// Create a scored segment. The score is clamped to `[0, 1]`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_index: usize,
        source_id: SourceId,
        start_time: f64,
        end_time: f64,
        audio_features: AudioFeatures,
        video_features: VideoFeatures,
        interest_score: f64,
    ) -> Self {
        Self {
            source_index,
            source_id,
            start_time,
            end_time,
            audio_features,
            video_features,
            interest_score: clamp_unit(interest_score),
        }
    }

    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// True when `next` starts exactly where this segment ends, in the
    /// same source. Drives run merging and transition planning.
    pub fn is_contiguous_with(&self, next: &Segment) -> bool {
        const EPSILON: f64 = 1e-6;
        self.source_index == next.source_index
            && self.source_id == next.source_id
            && (next.start_time - self.end_time).abs() < EPSILON
    }

    /// Chronological key: source order first, then start time.
    pub fn chronological_key(&self) -> (usize, f64) {
        (self.source_index, self.start_time)
    }
}
