//! Configuration for the highlight detection pipeline.

use serde::{Deserialize, Serialize};
use smartcut_models::{ScoringWeights, TransitionType};

use crate::error::{EngineError, EngineResult};

/// Detection sensitivity preset.
///
/// Maps to the scene-cut correlation threshold: higher sensitivity marks
/// more frame pairs as cuts and lifts the scene-change feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    /// Scene-change threshold for this preset.
    pub fn scene_change_threshold(self) -> f64 {
        match self {
            Sensitivity::Low => 0.4,
            Sensitivity::Medium => 0.3,
            Sensitivity::High => 0.2,
        }
    }
}

/// Configuration for one detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Nominal segment window length in seconds (the last segment of a
    /// source may be shorter).
    pub segment_duration: f64,

    /// Segments shorter than this are filtered before selection.
    pub min_segment_duration: f64,

    /// Minimum total duration of the highlight reel in seconds.
    pub target_min: f64,

    /// Maximum total duration of the highlight reel in seconds.
    pub target_max: f64,

    /// Composite scoring weights.
    pub weights: ScoringWeights,

    /// Detection sensitivity preset.
    pub sensitivity: Sensitivity,

    /// Histogram-correlation drop marking a scene cut. Derived from
    /// `sensitivity` unless overridden.
    pub scene_change_threshold: f64,

    /// dBFS floor below which an audio frame counts as silence.
    pub silence_threshold_db: f64,

    /// Transition applied between non-contiguous selected segments.
    pub default_transition: TransitionType,

    /// Transition effect duration in seconds.
    pub transition_duration: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            segment_duration: 10.0,
            min_segment_duration: 5.0,
            target_min: 180.0,
            target_max: 300.0,
            weights: ScoringWeights::default(),
            sensitivity: Sensitivity::Medium,
            scene_change_threshold: Sensitivity::Medium.scene_change_threshold(),
            silence_threshold_db: -40.0,
            default_transition: TransitionType::Fade,
            transition_duration: 0.5,
        }
    }
}

impl DetectionConfig {
    /// Apply a sensitivity preset, overriding the scene-change threshold.
    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self.scene_change_threshold = sensitivity.scene_change_threshold();
        self
    }

    /// Validate the configuration. Fails fast before any extraction work.
    pub fn validate(&self) -> EngineResult<()> {
        if self.target_min > self.target_max {
            return Err(EngineError::invalid_configuration(format!(
                "target_min ({:.1}s) exceeds target_max ({:.1}s)",
                self.target_min, self.target_max
            )));
        }
        if self.target_min < 0.0 {
            return Err(EngineError::invalid_configuration(
                "target_min must be non-negative",
            ));
        }
        if self.segment_duration <= 0.0 {
            return Err(EngineError::invalid_configuration(
                "segment_duration must be positive",
            ));
        }
        if self.min_segment_duration < 0.0 {
            return Err(EngineError::invalid_configuration(
                "min_segment_duration must be non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.scene_change_threshold) {
            return Err(EngineError::invalid_configuration(
                "scene_change_threshold must be within [0, 1]",
            ));
        }
        if self.transition_duration < 0.0 {
            return Err(EngineError::invalid_configuration(
                "transition_duration must be non-negative",
            ));
        }
        self.weights
            .validate()
            .map_err(EngineError::invalid_configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(DetectionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_target_range_rejected() {
        let config = DetectionConfig {
            target_min: 300.0,
            target_max: 180.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_bad_weights_rejected() {
        let mut config = DetectionConfig::default();
        config.weights.audio_weight = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sensitivity_presets() {
        let high = DetectionConfig::default().with_sensitivity(Sensitivity::High);
        let low = DetectionConfig::default().with_sensitivity(Sensitivity::Low);
        assert!(high.scene_change_threshold < low.scene_change_threshold);
    }

    #[test]
    fn test_zero_segment_duration_rejected() {
        let config = DetectionConfig {
            segment_duration: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
