//! Composite interest scoring.
//!
//! The weighted linear sum is a deliberately replaceable policy: the
//! selector only ever sees [`ScoringStrategy`], so a learned or
//! non-linear model can be substituted without touching selection.

use smartcut_models::{AudioFeatures, ScoringWeights, VideoFeatures};

use crate::error::{EngineError, EngineResult};

/// Pluggable scoring policy.
///
/// `time_position` is the segment midpoint normalized by the source's
/// total duration, in `[0, 1]`. Implementations must be pure: identical
/// inputs return bit-identical scores.
pub trait ScoringStrategy: Send + Sync {
    fn score(&self, audio: &AudioFeatures, video: &VideoFeatures, time_position: f64) -> f64;
}

/// Temporal-position score, peaking at the middle of the source.
///
/// Penalizes intros and outros, which are structurally biased toward
/// inclusion by naive position heuristics but statistically less
/// interesting.
pub fn time_score(position: f64) -> f64 {
    let p = position.clamp(0.0, 1.0);
    1.0 - (p - 0.5).abs() * 2.0
}

/// The default fixed linear weighted-sum scorer.
pub struct WeightedSumScorer {
    weights: ScoringWeights,
}

impl WeightedSumScorer {
    /// Create a scorer. Validates the weights and normalizes the
    /// top-level split to sum to 1.0.
    pub fn new(weights: ScoringWeights) -> EngineResult<Self> {
        weights
            .validate()
            .map_err(EngineError::invalid_configuration)?;
        Ok(Self {
            weights: weights.normalized(),
        })
    }

    /// Weighted audio modality score, clamped to `[0, 1]`.
    fn audio_score(&self, features: &AudioFeatures) -> f64 {
        let sub = &self.weights.audio_sub;
        let total = sub.volume + sub.spectral + sub.speech;
        if total <= 0.0 {
            return 0.0;
        }
        let score = (features.volume_change * sub.volume
            + features.spectral_change * sub.spectral
            + features.speech_activity * sub.speech)
            / total;
        score.clamp(0.0, 1.0)
    }

    /// Weighted video modality score, clamped to `[0, 1]`.
    fn video_score(&self, features: &VideoFeatures) -> f64 {
        let sub = &self.weights.video_sub;
        let total = sub.motion + sub.scene + sub.face;
        if total <= 0.0 {
            return 0.0;
        }
        let score = (features.motion_intensity * sub.motion
            + features.scene_change * sub.scene
            + features.face_presence * sub.face)
            / total;
        score.clamp(0.0, 1.0)
    }
}

impl ScoringStrategy for WeightedSumScorer {
    fn score(&self, audio: &AudioFeatures, video: &VideoFeatures, time_position: f64) -> f64 {
        let composite = self.audio_score(audio) * self.weights.audio_weight
            + self.video_score(video) * self.weights.video_weight
            + time_score(time_position) * self.weights.time_weight;
        composite.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> WeightedSumScorer {
        WeightedSumScorer::new(ScoringWeights::default()).unwrap()
    }

    #[test]
    fn test_time_score_symmetry() {
        for p in [0.0, 0.1, 0.25, 0.4, 0.5] {
            assert!((time_score(p) - time_score(1.0 - p)).abs() < 1e-12);
        }
        assert_eq!(time_score(0.5), 1.0);
        assert_eq!(time_score(0.0), 0.0);
        assert_eq!(time_score(1.0), 0.0);
    }

    #[test]
    fn test_score_bounds() {
        let s = scorer();
        let full_audio = AudioFeatures::new(1.0, 1.0, 1.0);
        let full_video = VideoFeatures::new(1.0, 1.0, 1.0);
        for p in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let score = s.score(&full_audio, &full_video, p);
            assert!((0.0..=1.0).contains(&score));
        }
        let zero = s.score(&AudioFeatures::silent(), &VideoFeatures::still(), 0.0);
        assert_eq!(zero, 0.0);
    }

    #[test]
    fn test_determinism() {
        let s = scorer();
        let audio = AudioFeatures::new(0.3, 0.7, 0.2);
        let video = VideoFeatures::new(0.6, 0.1, 0.4);
        let first = s.score(&audio, &video, 0.37);
        for _ in 0..10 {
            assert_eq!(s.score(&audio, &video, 0.37), first);
        }
    }

    #[test]
    fn test_zero_time_weight_ignores_position() {
        let weights = ScoringWeights {
            audio_weight: 0.5,
            video_weight: 0.5,
            time_weight: 0.0,
            ..Default::default()
        };
        let s = WeightedSumScorer::new(weights).unwrap();
        let audio = AudioFeatures::silent();
        let video = VideoFeatures::still();
        assert_eq!(s.score(&audio, &video, 0.5), 0.0);
        assert_eq!(s.score(&audio, &video, 0.0), 0.0);
    }

    #[test]
    fn test_midpoint_beats_edges() {
        let s = scorer();
        let audio = AudioFeatures::new(0.5, 0.5, 0.5);
        let video = VideoFeatures::new(0.5, 0.5, 0.5);
        let middle = s.score(&audio, &video, 0.5);
        let edge = s.score(&audio, &video, 0.02);
        assert!(middle > edge);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = ScoringWeights {
            audio_weight: -1.0,
            ..Default::default()
        };
        assert!(WeightedSumScorer::new(weights).is_err());
    }

    #[test]
    fn test_unnormalized_weights_accepted() {
        let weights = ScoringWeights {
            audio_weight: 4.0,
            video_weight: 4.0,
            time_weight: 2.0,
            ..Default::default()
        };
        let s = WeightedSumScorer::new(weights).unwrap();
        let score = s.score(
            &AudioFeatures::new(1.0, 1.0, 1.0),
            &VideoFeatures::new(1.0, 1.0, 1.0),
            0.5,
        );
        assert!((score - 1.0).abs() < 1e-9);
    }
}
