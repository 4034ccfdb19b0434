//! Audio feature extraction.
//!
//! Works on decoded mono waveforms, one segment window at a time. All
//! features are computed from short sub-windows inside the segment, so
//! extraction is a pure function of the window: identical input always
//! produces identical output, which the feature cache relies on.

use smartcut_models::AudioFeatures;
use tracing::trace;

use crate::source::AudioWindow;

/// Sub-window length for RMS/centroid tracking (1 s).
const SUB_WINDOW_SECS: f64 = 1.0;

/// Analysis frame length for the voice-activity heuristic (20 ms).
const VAD_FRAME_SECS: f64 = 0.02;

/// RMS change ratio between consecutive sub-windows that counts as a
/// volume-change event.
const VOLUME_CHANGE_RATIO: f64 = 0.2;

/// Volume-change events per window at which the feature saturates.
const VOLUME_CHANGE_SATURATION: f64 = 10.0;

/// Upper bound on samples fed into the centroid DFT per sub-window.
/// Longer sub-windows are strided down; keeps the cost flat regardless
/// of sample rate.
const MAX_DFT_SAMPLES: usize = 2048;

/// Number of evenly spaced frequency bands evaluated by the DFT.
const DFT_BANDS: usize = 64;

/// Per-window audio feature extractor.
///
/// Stateless: deterministic and side-effect-free for identical windows.
pub struct AudioFeatureExtractor {
    silence_threshold_db: f64,
}

impl AudioFeatureExtractor {
    /// Create an extractor with the configured silence floor (dBFS).
    pub fn new(silence_threshold_db: f64) -> Self {
        Self {
            silence_threshold_db,
        }
    }

    /// Extract audio features for one segment window.
    pub fn extract(&self, window: &AudioWindow) -> AudioFeatures {
        if window.is_empty() || window.sample_rate == 0 {
            return AudioFeatures::silent();
        }

        let sub_len = ((window.sample_rate as f64 * SUB_WINDOW_SECS) as usize).max(1);
        let sub_windows: Vec<&[f32]> = window
            .samples
            .chunks(sub_len)
            .filter(|c| c.len() >= sub_len / 2)
            .collect();

        let volume_change = volume_change_score(&sub_windows);
        let spectral_change = spectral_change_score(&sub_windows);
        let speech_activity = self.speech_fraction(window);

        trace!(
            volume_change,
            spectral_change,
            speech_activity,
            sub_windows = sub_windows.len(),
            "audio window features"
        );

        AudioFeatures::new(volume_change, spectral_change, speech_activity)
    }

    /// Fraction of 20 ms frames whose level clears the silence floor.
    fn speech_fraction(&self, window: &AudioWindow) -> f64 {
        let frame_len = ((window.sample_rate as f64 * VAD_FRAME_SECS) as usize).max(1);
        let mut speech_frames = 0usize;
        let mut frames = 0usize;

        for frame in window.samples.chunks(frame_len) {
            if frame.len() < frame_len / 2 {
                break;
            }
            frames += 1;
            let level_db = dbfs(root_mean_square(frame));
            if level_db > self.silence_threshold_db {
                speech_frames += 1;
            }
        }

        if frames == 0 {
            0.0
        } else {
            speech_frames as f64 / frames as f64
        }
    }
}

/// Count RMS jumps between consecutive sub-windows, saturating at
/// `VOLUME_CHANGE_SATURATION` events.
fn volume_change_score(sub_windows: &[&[f32]]) -> f64 {
    if sub_windows.len() < 2 {
        return 0.0;
    }

    let mut events = 0usize;
    let mut prev_rms = root_mean_square(sub_windows[0]);
    for sub in &sub_windows[1..] {
        let rms = root_mean_square(sub);
        let ratio = (rms - prev_rms).abs() / prev_rms.max(1e-4);
        if ratio > VOLUME_CHANGE_RATIO {
            events += 1;
        }
        prev_rms = rms;
    }

    events as f64 / VOLUME_CHANGE_SATURATION
}

/// Mean absolute centroid delta between consecutive sub-windows.
fn spectral_change_score(sub_windows: &[&[f32]]) -> f64 {
    if sub_windows.len() < 2 {
        return 0.0;
    }

    let centroids: Vec<f64> = sub_windows.iter().map(|s| normalized_centroid(s)).collect();
    let mut total = 0.0;
    for pair in centroids.windows(2) {
        total += (pair[1] - pair[0]).abs();
    }

    // Centroid deltas rarely exceed half the normalized band, so scale
    // up before the clamp to keep the feature responsive.
    (total / (centroids.len() - 1) as f64) * 2.0
}

/// Spectral centroid normalized to `[0, 1]` of the effective Nyquist.
///
/// Direct DFT over a fixed set of bands on a strided subset of the
/// samples. A full FFT is unnecessary at this resolution.
fn normalized_centroid(samples: &[f32]) -> f64 {
    let stride = (samples.len() / MAX_DFT_SAMPLES).max(1);
    let strided: Vec<f64> = samples.iter().step_by(stride).map(|s| *s as f64).collect();
    let n = strided.len();
    if n < 2 {
        return 0.0;
    }

    let mut weighted = 0.0;
    let mut total = 0.0;
    for band in 1..=DFT_BANDS {
        let fraction = band as f64 / DFT_BANDS as f64;
        let omega = std::f64::consts::PI * fraction;
        let mut re = 0.0;
        let mut im = 0.0;
        for (i, s) in strided.iter().enumerate() {
            let phase = omega * i as f64;
            re += s * phase.cos();
            im -= s * phase.sin();
        }
        let magnitude = (re * re + im * im).sqrt() / n as f64;
        weighted += fraction * magnitude;
        total += magnitude;
    }

    if total <= 0.0 {
        0.0
    } else {
        weighted / total
    }
}

/// RMS of a sample slice.
fn root_mean_square(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|s| (*s as f64) * (*s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Convert linear RMS to dBFS, floored well below any usable threshold.
fn dbfs(rms: f64) -> f64 {
    if rms <= 1e-10 {
        -200.0
    } else {
        20.0 * rms.log10()
    }
}
