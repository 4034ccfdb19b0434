//! Video feature extraction.
//!
//! Works on decoded RGB24 frame sequences for one segment window.
//! Motion comes from inter-frame gray differencing, scene cuts from
//! color-histogram correlation drops, face presence from a cheap
//! skin-tone heuristic. Heavier detectors (neural face tracking, object
//! detection) are external collaborators and out of scope here.

use smartcut_models::VideoFeatures;
use tracing::trace;

use crate::source::VideoFrame;

/// Bins per RGB channel for the scene-cut histogram.
const HISTOGRAM_BINS: usize = 8;

/// Cut fraction at which the scene-change feature saturates:
/// one cut per 8 sampled frame pairs maps to 1.0.
const SCENE_SATURATION: f64 = 8.0;

/// Skin-pixel fraction at which the face-presence feature saturates.
const FACE_SATURATION: f64 = 4.0;

/// Stateless per-window video feature extractor.
///
/// Deterministic for identical frame sequences.
pub struct VideoFeatureExtractor {
    scene_change_threshold: f64,
}

impl VideoFeatureExtractor {
    /// Create an extractor with the configured scene-cut threshold.
    pub fn new(scene_change_threshold: f64) -> Self {
        Self {
            scene_change_threshold,
        }
    }

    /// Extract video features for one segment window.
    pub fn extract(&self, frames: &[VideoFrame]) -> VideoFeatures {
        if frames.is_empty() {
            return VideoFeatures::still();
        }

        let motion_intensity = self.motion_intensity(frames);
        let scene_change = self.scene_change(frames);
        let face_presence = self.face_presence(frames);

        trace!(
            motion_intensity,
            scene_change,
            face_presence,
            frame_count = frames.len(),
            "video window features"
        );

        VideoFeatures::new(motion_intensity, scene_change, face_presence)
    }

    /// Aggregate inter-frame motion over the window.
    ///
    /// Per-pair motion is the mean absolute gray difference normalized to
    /// `[0, 1]`; the window aggregate blends average, variance and peak
    /// so that both sustained and bursty motion raise the feature.
    fn motion_intensity(&self, frames: &[VideoFrame]) -> f64 {
        let mut diffs = Vec::with_capacity(frames.len().saturating_sub(1));
        for pair in frames.windows(2) {
            if let Some(diff) = gray_mean_diff(&pair[0], &pair[1]) {
                diffs.push(diff);
            }
        }
        if diffs.is_empty() {
            return 0.0;
        }

        let avg = mean(&diffs);
        let var = variance(&diffs, avg);
        let max = diffs.iter().cloned().fold(0.0, f64::max);

        avg * 0.4 + var * 10.0 * 0.3 + max * 0.3
    }

    /// Scene-cut magnitude from histogram correlation between consecutive
    /// frames. A pair whose correlation falls below
    /// `1 - scene_change_threshold` counts as a cut.
    fn scene_change(&self, frames: &[VideoFrame]) -> f64 {
        let mut cuts = 0usize;
        let mut pairs = 0usize;
        let mut prev_hist: Option<Vec<f64>> = None;

        for frame in frames {
            let hist = rgb_histogram(frame);
            if let Some(prev) = &prev_hist {
                pairs += 1;
                if histogram_correlation(prev, &hist) < 1.0 - self.scene_change_threshold {
                    cuts += 1;
                }
            }
            prev_hist = Some(hist);
        }

        if pairs == 0 {
            0.0
        } else {
            (cuts as f64 / pairs as f64) * SCENE_SATURATION
        }
    }

    /// Mean skin-tone pixel fraction across the window, center-weighted.
    fn face_presence(&self, frames: &[VideoFrame]) -> f64 {
        let mut total = 0.0;
        for frame in frames {
            total += skin_fraction(frame);
        }
        (total / frames.len() as f64) * FACE_SATURATION
    }
}

/// Mean absolute gray difference between two frames of identical
/// geometry, normalized to `[0, 1]`. None when sizes differ.
fn gray_mean_diff(a: &VideoFrame, b: &VideoFrame) -> Option<f64> {
    if a.width != b.width || a.height != b.height {
        return None;
    }
    let pixels = a.pixel_count();
    if pixels == 0 || a.rgb.len() < pixels * 3 || b.rgb.len() < pixels * 3 {
        return None;
    }

    let mut sum = 0.0;
    for i in 0..pixels {
        let ga = luma(&a.rgb[i * 3..i * 3 + 3]);
        let gb = luma(&b.rgb[i * 3..i * 3 + 3]);
        sum += (ga - gb).abs();
    }
    Some(sum / pixels as f64 / 255.0)
}

/// ITU-R BT.601 luma of one RGB pixel.
fn luma(px: &[u8]) -> f64 {
    0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64
}

/// Normalized RGB histogram with `HISTOGRAM_BINS` per channel.
fn rgb_histogram(frame: &VideoFrame) -> Vec<f64> {
    let bins = HISTOGRAM_BINS;
    let mut histogram = vec![0.0; bins * bins * bins];
    let pixels = frame.pixel_count();
    if frame.rgb.len() < pixels * 3 {
        return histogram;
    }

    let bin_width = 256 / bins;
    for i in 0..pixels {
        let r = frame.rgb[i * 3] as usize / bin_width;
        let g = frame.rgb[i * 3 + 1] as usize / bin_width;
        let b = frame.rgb[i * 3 + 2] as usize / bin_width;
        histogram[r * bins * bins + g * bins + b] += 1.0;
    }

    let total: f64 = histogram.iter().sum();
    if total > 0.0 {
        for v in &mut histogram {
            *v /= total;
        }
    }
    histogram
}

/// Pearson correlation between two histograms, as OpenCV's
/// `HISTCMP_CORREL` defines it. 1.0 for identical distributions.
fn histogram_correlation(h1: &[f64], h2: &[f64]) -> f64 {
    if h1.len() != h2.len() || h1.is_empty() {
        return 0.0;
    }
    let n = h1.len() as f64;
    let mean1: f64 = h1.iter().sum::<f64>() / n;
    let mean2: f64 = h2.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var1 = 0.0;
    let mut var2 = 0.0;
    for (a, b) in h1.iter().zip(h2.iter()) {
        let da = a - mean1;
        let db = b - mean2;
        cov += da * db;
        var1 += da * da;
        var2 += db * db;
    }

    let denom = (var1 * var2).sqrt();
    if denom <= 0.0 {
        // Two flat histograms are trivially identical.
        if var1 == 0.0 && var2 == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        cov / denom
    }
}

/// Fraction of pixels matching a classic RGB skin-tone rule, with the
/// center third of the frame weighted double.
fn skin_fraction(frame: &VideoFrame) -> f64 {
    let pixels = frame.pixel_count();
    if pixels == 0 || frame.rgb.len() < pixels * 3 {
        return 0.0;
    }

    let width = frame.width as usize;
    let height = frame.height as usize;
    let cx = (width / 3, width * 2 / 3);
    let cy = (height / 3, height * 2 / 3);

    let mut weighted_skin = 0.0;
    let mut weight_total = 0.0;
    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) * 3;
            let (r, g, b) = (frame.rgb[i], frame.rgb[i + 1], frame.rgb[i + 2]);
            let weight = if x >= cx.0 && x < cx.1 && y >= cy.0 && y < cy.1 {
                2.0
            } else {
                1.0
            };
            weight_total += weight;
            if is_skin(r, g, b) {
                weighted_skin += weight;
            }
        }
    }

    if weight_total == 0.0 {
        0.0
    } else {
        weighted_skin / weight_total
    }
}

/// RGB skin-tone rule (Kovac et al.): works for rough presence, not
/// localization.
fn is_skin(r: u8, g: u8, b: u8) -> bool {
    let (rf, gf, bf) = (r as i32, g as i32, b as i32);
    rf > 95
        && gf > 40
        && bf > 20
        && rf > gf
        && rf > bf
        && (rf - gf).abs() > 15
        && rf.max(gf).max(bf) - rf.min(gf).min(bf) > 15
}

/// Arithmetic mean.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance.
fn variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(t: f64, r: u8, g: u8, b: u8) -> VideoFrame {
        let (w, h) = (16u32, 16u32);
        let rgb: Vec<u8> = (0..(w * h)).flat_map(|_| [r, g, b]).collect();
        VideoFrame::new(t, w, h, rgb)
    }

    #[test]
    fn test_empty_sequence() {
        let extractor = VideoFeatureExtractor::new(0.3);
        assert_eq!(extractor.extract(&[]), VideoFeatures::still());
    }

    #[test]
    fn test_static_frames_no_motion() {
        let extractor = VideoFeatureExtractor::new(0.3);
        let frames: Vec<VideoFrame> = (0..10).map(|i| solid_frame(i as f64, 60, 60, 60)).collect();
        let features = extractor.extract(&frames);
        assert_eq!(features.motion_intensity, 0.0);
        assert_eq!(features.scene_change, 0.0);
    }

    #[test]
    fn test_hard_cut_detected() {
        let extractor = VideoFeatureExtractor::new(0.3);
        let mut frames: Vec<VideoFrame> =
            (0..5).map(|i| solid_frame(i as f64, 200, 0, 0)).collect();
        frames.extend((5..10).map(|i| solid_frame(i as f64, 0, 0, 200)));
        let features = extractor.extract(&frames);
        assert!(features.scene_change > 0.0, "red->blue cut should register");
        assert!(features.motion_intensity > 0.0);
    }

    #[test]
    fn test_alternating_frames_high_motion() {
        let extractor = VideoFeatureExtractor::new(0.3);
        let frames: Vec<VideoFrame> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    solid_frame(i as f64, 255, 255, 255)
                } else {
                    solid_frame(i as f64, 0, 0, 0)
                }
            })
            .collect();
        let features = extractor.extract(&frames);
        assert!(features.motion_intensity > 0.5);
    }

    #[test]
    fn test_skin_frame_raises_face_presence() {
        let extractor = VideoFeatureExtractor::new(0.3);
        // Typical skin tone vs a gray frame.
        let skin = extractor.extract(&[solid_frame(0.0, 205, 140, 115)]);
        let gray = extractor.extract(&[solid_frame(0.0, 90, 90, 90)]);
        assert!(skin.face_presence > gray.face_presence);
        assert_eq!(gray.face_presence, 0.0);
    }

    #[test]
    fn test_histogram_correlation_bounds() {
        let a = solid_frame(0.0, 200, 0, 0);
        let b = solid_frame(0.0, 0, 0, 200);
        let ha = rgb_histogram(&a);
        let hb = rgb_histogram(&b);
        assert!((histogram_correlation(&ha, &ha) - 1.0).abs() < 1e-9);
        assert!(histogram_correlation(&ha, &hb) < 0.5);
    }

    #[test]
    fn test_deterministic() {
        let extractor = VideoFeatureExtractor::new(0.3);
        let frames: Vec<VideoFrame> = (0..6).map(|i| solid_frame(i as f64, 30, 80, 120)).collect();
        assert_eq!(extractor.extract(&frames), extractor.extract(&frames));
    }

    #[test]
    fn test_mismatched_sizes_skipped() {
        let extractor = VideoFeatureExtractor::new(0.3);
        let a = solid_frame(0.0, 10, 10, 10);
        let b = VideoFrame::new(1.0, 8, 8, vec![200; 8 * 8 * 3]);
        let features = extractor.extract(&[a, b]);
        assert_eq!(features.motion_intensity, 0.0, "cross-geometry pairs are not compared");
    }
}
