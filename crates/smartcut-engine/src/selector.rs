//! Duration-bounded greedy segment selection.
//!
//! Given all scored segments across the batch, picks a subset maximizing
//! score within the `[target_min, target_max]` duration window, then
//! restores chronological order. Greedy-by-score is the contract
//! baseline; the tie-break and ordering rules are binding, the admission
//! strategy is not.

use std::cmp::Ordering;

use smartcut_models::{Segment, SelectionResult};
use tracing::{debug, info};

use crate::config::DetectionConfig;

/// Selects highlight segments under a global duration budget.
pub struct SegmentSelector {
    target_min: f64,
    target_max: f64,
    min_segment_duration: f64,
}

impl SegmentSelector {
    pub fn new(target_min: f64, target_max: f64, min_segment_duration: f64) -> Self {
        Self {
            target_min,
            target_max,
            min_segment_duration,
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(
            config.target_min,
            config.target_max,
            config.min_segment_duration,
        )
    }

    /// Select a highlight subset from scored candidates.
    ///
    /// Deterministic and idempotent: the same candidate set and
    /// configuration always produce an identical result, regardless of
    /// candidate order (a full sort precedes admission).
    pub fn select(&self, candidates: &[Segment]) -> SelectionResult {
        let mut valid: Vec<Segment> = candidates
            .iter()
            .filter(|s| s.duration() >= self.min_segment_duration)
            .cloned()
            .collect();

        if valid.is_empty() {
            debug!("no candidates survive the minimum-duration filter");
            return SelectionResult::empty();
        }

        let total_available: f64 = valid.iter().map(Segment::duration).sum();
        if total_available < self.target_min {
            // Infeasible target: best effort is everything we have.
            info!(
                total_available,
                target_min = self.target_min,
                "available content below target, returning full set"
            );
            sort_chronological(&mut valid);
            let merged = merge_contiguous(valid);
            return SelectionResult::from_segments(merged, true, false);
        }

        // Score-descending admission order; equal scores resolve to the
        // chronologically earlier segment to keep results reproducible.
        let mut sorted = valid;
        sorted.sort_by(compare_by_score);

        let mut admitted: Vec<Segment> = Vec::new();
        let mut cumulative = 0.0;
        for segment in &sorted {
            if cumulative >= self.target_min {
                break;
            }
            if cumulative + segment.duration() <= self.target_max {
                cumulative += segment.duration();
                admitted.push(segment.clone());
            }
        }

        let mut over_target = false;
        if admitted.is_empty() && sorted[0].duration() > self.target_max {
            // Every candidate alone exceeds target_max. The fixed segment
            // granularity cannot be subdivided, so include the single best
            // one and flag it rather than returning nothing.
            let best = sorted[0].clone();
            info!(
                duration = best.duration(),
                target_max = self.target_max,
                "single segment exceeds target_max, including it alone"
            );
            cumulative = best.duration();
            admitted.push(best);
            over_target = true;
        }

        let under_target = cumulative < self.target_min && !over_target;

        sort_chronological(&mut admitted);
        let merged = merge_contiguous(admitted);

        info!(
            selected = merged.len(),
            total_duration = cumulative,
            under_target,
            over_target,
            "segment selection complete"
        );

        SelectionResult::from_segments(merged, under_target, over_target)
    }
}

/// Score descending, then `(source_index, start_time)` ascending.
fn compare_by_score(a: &Segment, b: &Segment) -> Ordering {
    b.interest_score
        .partial_cmp(&a.interest_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| compare_chronological(a, b))
}

/// `(source_index, start_time)` ascending.
fn compare_chronological(a: &Segment, b: &Segment) -> Ordering {
    a.source_index.cmp(&b.source_index).then_with(|| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(Ordering::Equal)
    })
}

fn sort_chronological(segments: &mut [Segment]) {
    segments.sort_by(compare_chronological);
}

/// Merge admitted segments that are mutually adjacent in source time into
/// continuous runs. Fewer boundaries means fewer transitions downstream.
///
/// A run's score is the duration-weighted mean of its members; the
/// feature breakdown kept is the first member's.
fn merge_contiguous(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.is_contiguous_with(&segment) => {
                let combined_duration = last.duration() + segment.duration();
                let weighted_score = (last.interest_score * last.duration()
                    + segment.interest_score * segment.duration())
                    / combined_duration;
                last.end_time = segment.end_time;
                last.interest_score = weighted_score;
            }
            _ => merged.push(segment),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcut_models::{AudioFeatures, SourceId, VideoFeatures};

    fn segment(source_index: usize, start: f64, end: f64, score: f64) -> Segment {
        Segment::new(
            source_index,
            SourceId::new(format!("source-{source_index}")),
            start,
            end,
            AudioFeatures::silent(),
            VideoFeatures::still(),
            score,
        )
    }

    /// Ten 10s segments with alternating high and low scores.
    fn example_candidates() -> Vec<Segment> {
        let scores = [0.9, 0.1, 0.8, 0.2, 0.7, 0.3, 0.6, 0.4, 0.5, 0.5];
        scores
            .iter()
            .enumerate()
            .map(|(i, score)| segment(0, i as f64 * 10.0, (i + 1) as f64 * 10.0, *score))
            .collect()
    }

    #[test]
    fn test_greedy_admission_within_bounds() {
        let selector = SegmentSelector::new(60.0, 80.0, 5.0);
        let result = selector.select(&example_candidates());

        assert!(!result.under_target);
        assert!(!result.over_target);
        assert!(result.total_duration >= 60.0 && result.total_duration <= 80.0);

        // Top scores 0.9, 0.8, 0.7, 0.6 and both 0.5s (60s total), back in
        // chronological order; the contiguous 0.5 pair merges into one run.
        let ranges = result.time_ranges();
        assert_eq!(
            ranges,
            vec![
                (0.0, 10.0),
                (20.0, 30.0),
                (40.0, 50.0),
                (60.0, 70.0),
                (80.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_under_target_returns_full_set() {
        let selector = SegmentSelector::new(180.0, 300.0, 5.0);
        let candidates = vec![
            segment(0, 0.0, 10.0, 0.2),
            segment(0, 10.0, 20.0, 0.9),
            segment(0, 20.0, 30.0, 0.4),
        ];
        let result = selector.select(&candidates);

        assert!(result.under_target);
        assert!(!result.over_target);
        // All 30s of content come back as one merged chronological run.
        assert_eq!(result.time_ranges(), vec![(0.0, 30.0)]);
        assert!((result.total_duration - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_scores_fall_back_to_earliest() {
        let selector = SegmentSelector::new(30.0, 40.0, 5.0);
        let candidates: Vec<Segment> = (0..10)
            .map(|i| segment(0, i as f64 * 10.0, (i + 1) as f64 * 10.0, 0.0))
            .collect();
        let result = selector.select(&candidates);

        // Tie-break admits the earliest segments first.
        assert_eq!(result.time_ranges(), vec![(0.0, 30.0)]);
        assert!(!result.under_target);
    }

    #[test]
    fn test_zero_target_min_selects_nothing() {
        let selector = SegmentSelector::new(0.0, 80.0, 5.0);
        let candidates = vec![segment(0, 0.0, 10.0, 0.9), segment(0, 20.0, 30.0, 0.8)];
        let result = selector.select(&candidates);

        // A zero minimum is satisfied by the empty selection; candidates
        // that fit under target_max must never raise the oversize flag.
        assert_eq!(result.segment_count(), 0);
        assert!(!result.over_target);
        assert!(!result.under_target);
    }

    #[test]
    fn test_oversized_segment_included_alone() {
        let selector = SegmentSelector::new(60.0, 80.0, 5.0);
        let candidates = vec![segment(0, 0.0, 100.0, 0.9), segment(0, 100.0, 195.0, 0.5)];
        let result = selector.select(&candidates);

        assert!(result.over_target);
        assert_eq!(result.segment_count(), 1);
        assert_eq!(result.time_ranges(), vec![(0.0, 100.0)]);
    }

    #[test]
    fn test_order_preservation_across_sources() {
        let selector = SegmentSelector::new(20.0, 40.0, 5.0);
        let candidates = vec![
            segment(1, 0.0, 10.0, 0.9),
            segment(0, 50.0, 60.0, 0.8),
            segment(0, 10.0, 20.0, 0.7),
            segment(1, 30.0, 40.0, 0.6),
        ];
        let result = selector.select(&candidates);

        let keys: Vec<(usize, f64)> = result
            .segments
            .iter()
            .map(Segment::chronological_key)
            .collect();
        let mut sorted_keys = keys.clone();
        sorted_keys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(keys, sorted_keys, "selection must preserve chronology");
    }

    #[test]
    fn test_idempotence() {
        let selector = SegmentSelector::new(60.0, 80.0, 5.0);
        let candidates = example_candidates();
        let first = selector.select(&candidates);
        let second = selector.select(&candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_candidate_order_irrelevant() {
        let selector = SegmentSelector::new(60.0, 80.0, 5.0);
        let forward = selector.select(&example_candidates());
        let mut reversed = example_candidates();
        reversed.reverse();
        let backward = selector.select(&reversed);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_short_segments_filtered() {
        let selector = SegmentSelector::new(10.0, 40.0, 5.0);
        let candidates = vec![
            segment(0, 0.0, 3.0, 1.0), // below min_segment_duration
            segment(0, 10.0, 20.0, 0.5),
            segment(0, 30.0, 40.0, 0.4),
        ];
        let result = selector.select(&candidates);
        assert!(result
            .segments
            .iter()
            .all(|s| s.duration() >= 5.0), "3s fragment must not be admitted");
    }

    #[test]
    fn test_merged_run_score_weighted() {
        let selector = SegmentSelector::new(20.0, 20.0, 5.0);
        let candidates = vec![segment(0, 0.0, 10.0, 0.8), segment(0, 10.0, 20.0, 0.4)];
        let result = selector.select(&candidates);
        assert_eq!(result.segment_count(), 1);
        assert!((result.segments[0].interest_score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_empty_candidates() {
        let selector = SegmentSelector::new(60.0, 80.0, 5.0);
        let result = selector.select(&[]);
        assert!(result.under_target);
        assert_eq!(result.segment_count(), 0);
    }

    #[test]
    fn test_duration_bound_property() {
        // For any feasible candidate set the result lands in range.
        let selector = SegmentSelector::new(25.0, 45.0, 5.0);
        for n in 5..12 {
            let candidates: Vec<Segment> = (0..n)
                .map(|i| {
                    segment(
                        0,
                        i as f64 * 10.0,
                        (i + 1) as f64 * 10.0,
                        (i as f64 * 0.37).fract(),
                    )
                })
                .collect();
            let result = selector.select(&candidates);
            assert!(
                result.total_duration >= 25.0 && result.total_duration <= 45.0,
                "n={n}: {} out of range",
                result.total_duration
            );
        }
    }
}
