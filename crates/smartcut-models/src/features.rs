//! Per-segment feature vectors.
//!
//! One vector per modality. All values are normalized to `[0, 1]` at
//! construction time and never mutated afterwards; the extractors are the
//! only producers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Clamp a feature value to the normalized `[0, 1]` range.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Audio-modality features for one segment window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudioFeatures {
    /// RMS volume ratio relative to the previous window.
    pub volume_change: f64,

    /// Normalized delta of the spectral centroid vs the previous window.
    pub spectral_change: f64,

    /// Fraction of the window classified as speech by the energy heuristic.
    pub speech_activity: f64,
}

impl AudioFeatures {
    /// Create a feature vector, clamping every value to `[0, 1]`.
    pub fn new(volume_change: f64, spectral_change: f64, speech_activity: f64) -> Self {
        Self {
            volume_change: clamp_unit(volume_change),
            spectral_change: clamp_unit(spectral_change),
            speech_activity: clamp_unit(speech_activity),
        }
    }

    /// All-zero features, used when a window decodes but carries no signal.
    pub fn silent() -> Self {
        Self {
            volume_change: 0.0,
            spectral_change: 0.0,
            speech_activity: 0.0,
        }
    }
}

/// Video-modality features for one segment window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoFeatures {
    /// Mean inter-frame pixel-difference magnitude.
    pub motion_intensity: f64,

    /// Scene-cut magnitude derived from histogram correlation drops.
    pub scene_change: f64,

    /// Presence of a salient face/skin region (0.0 when detection disabled).
    pub face_presence: f64,
}

impl VideoFeatures {
    /// Create a feature vector, clamping every value to `[0, 1]`.
    pub fn new(motion_intensity: f64, scene_change: f64, face_presence: f64) -> Self {
        Self {
            motion_intensity: clamp_unit(motion_intensity),
            scene_change: clamp_unit(scene_change),
            face_presence: clamp_unit(face_presence),
        }
    }

    /// All-zero features for a static, empty window.
    pub fn still() -> Self {
        Self {
            motion_intensity: 0.0,
            scene_change: 0.0,
            face_presence: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_features_clamped() {
        let f = AudioFeatures::new(1.7, -0.3, 0.5);
        assert_eq!(f.volume_change, 1.0);
        assert_eq!(f.spectral_change, 0.0);
        assert_eq!(f.speech_activity, 0.5);
    }

    #[test]
    fn test_video_features_clamped() {
        let f = VideoFeatures::new(-1.0, 2.0, 0.25);
        assert_eq!(f.motion_intensity, 0.0);
        assert_eq!(f.scene_change, 1.0);
        assert_eq!(f.face_presence, 0.25);
    }
}
