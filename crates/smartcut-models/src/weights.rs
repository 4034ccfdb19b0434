//! Scoring weight configuration.
//!
//! Top-level weights split the composite score between audio, video and
//! time-position; sub-weights split each modality between its features.
//! Weights are normalized before use so callers may supply any
//! non-negative values with a positive total.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sub-weights within the audio modality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudioSubWeights {
    pub volume: f64,
    pub spectral: f64,
    pub speech: f64,
}

impl Default for AudioSubWeights {
    fn default() -> Self {
        Self {
            volume: 0.4,
            spectral: 0.2,
            speech: 0.4,
        }
    }
}

/// Sub-weights within the video modality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoSubWeights {
    pub motion: f64,
    pub scene: f64,
    pub face: f64,
}

impl Default for VideoSubWeights {
    fn default() -> Self {
        Self {
            motion: 0.5,
            scene: 0.3,
            face: 0.2,
        }
    }
}

/// Complete weight set for composite scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoringWeights {
    /// Weight of the audio modality score.
    pub audio_weight: f64,

    /// Weight of the video modality score.
    pub video_weight: f64,

    /// Weight of the temporal-position score.
    pub time_weight: f64,

    /// Feature split within the audio modality.
    #[serde(default)]
    pub audio_sub: AudioSubWeights,

    /// Feature split within the video modality.
    #[serde(default)]
    pub video_sub: VideoSubWeights,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            audio_weight: 0.4,
            video_weight: 0.4,
            time_weight: 0.2,
            audio_sub: AudioSubWeights::default(),
            video_sub: VideoSubWeights::default(),
        }
    }
}

impl ScoringWeights {
    /// Check that no weight is negative and each group has a positive total.
    ///
    /// Returns a human-readable reason on failure; the engine maps it to
    /// its fail-fast configuration error.
    pub fn validate(&self) -> Result<(), String> {
        let top = [self.audio_weight, self.video_weight, self.time_weight];
        if top.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err("modality weights must be finite and non-negative".to_string());
        }
        if top.iter().sum::<f64>() <= 0.0 {
            return Err("modality weights must sum to a positive total".to_string());
        }

        let audio = [
            self.audio_sub.volume,
            self.audio_sub.spectral,
            self.audio_sub.speech,
        ];
        if audio.iter().any(|w| *w < 0.0 || !w.is_finite()) || audio.iter().sum::<f64>() <= 0.0 {
            return Err("audio sub-weights must be non-negative with a positive total".to_string());
        }

        let video = [
            self.video_sub.motion,
            self.video_sub.scene,
            self.video_sub.face,
        ];
        if video.iter().any(|w| *w < 0.0 || !w.is_finite()) || video.iter().sum::<f64>() <= 0.0 {
            return Err("video sub-weights must be non-negative with a positive total".to_string());
        }

        Ok(())
    }

    /// Rescale the top-level weights to sum to exactly 1.0.
    ///
    /// Sub-weights are left as-is; the scorer normalizes them at use site.
    pub fn normalized(&self) -> Self {
        let total = self.audio_weight + self.video_weight + self.time_weight;
        if total <= 0.0 {
            return *self;
        }
        Self {
            audio_weight: self.audio_weight / total,
            video_weight: self.video_weight / total,
            time_weight: self.time_weight / total,
            audio_sub: self.audio_sub,
            video_sub: self.video_sub,
        }
    }
}
