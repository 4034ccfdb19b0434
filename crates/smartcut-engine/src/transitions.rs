//! Transition planning.
//!
//! Walks adjacent pairs of the chronologically ordered selection and
//! assigns the configured effect wherever playback jumps in source time.
//! The render collaborator consumes the plan alongside the cut list.

use smartcut_models::{SelectionResult, Transition, TransitionPlan, TransitionType};
use tracing::debug;

use crate::config::DetectionConfig;

/// Assigns transitions between selected segments.
pub struct TransitionPlanner {
    default_transition: TransitionType,
    transition_duration: f64,
}

impl TransitionPlanner {
    pub fn new(default_transition: TransitionType, transition_duration: f64) -> Self {
        Self {
            default_transition,
            transition_duration,
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.default_transition, config.transition_duration)
    }

    /// Produce one transition per adjacency in the selection.
    ///
    /// A pair that is a direct continuation in source time gets
    /// `TransitionType::None` with zero duration; every other boundary
    /// gets the configured default. What counts as "discontinuous"
    /// derives from the same contiguity predicate the selector's merge
    /// step uses.
    pub fn plan(&self, selection: &SelectionResult) -> TransitionPlan {
        let mut transitions = Vec::with_capacity(selection.segments.len().saturating_sub(1));

        for pair in selection.segments.windows(2) {
            let transition = if pair[0].is_contiguous_with(&pair[1]) {
                Transition::none()
            } else {
                Transition::new(self.default_transition, self.transition_duration)
            };
            transitions.push(transition);
        }

        debug!(
            boundaries = transitions.len(),
            effect = ?self.default_transition,
            "transition plan complete"
        );

        TransitionPlan::new(transitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcut_models::{AudioFeatures, Segment, SourceId, VideoFeatures};

    fn segment(source_index: usize, start: f64, end: f64) -> Segment {
        Segment::new(
            source_index,
            SourceId::new(format!("source-{source_index}")),
            start,
            end,
            AudioFeatures::silent(),
            VideoFeatures::still(),
            0.5,
        )
    }

    fn planner() -> TransitionPlanner {
        TransitionPlanner::new(TransitionType::Fade, 0.5)
    }

    #[test]
    fn test_discontinuous_boundary_gets_default() {
        let selection = SelectionResult::from_segments(
            vec![segment(0, 0.0, 10.0), segment(0, 30.0, 40.0)],
            false,
            false,
        );
        let plan = planner().plan(&selection);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.transitions[0].transition_type, TransitionType::Fade);
        assert!((plan.transitions[0].duration - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_contiguous_boundary_gets_none() {
        let selection = SelectionResult::from_segments(
            vec![segment(0, 0.0, 10.0), segment(0, 10.0, 20.0)],
            false,
            false,
        );
        let plan = planner().plan(&selection);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.transitions[0].transition_type, TransitionType::None);
        assert_eq!(plan.transitions[0].duration, 0.0);
    }

    #[test]
    fn test_cross_source_boundary_gets_default() {
        // Same timestamps but different sources: never contiguous.
        let selection = SelectionResult::from_segments(
            vec![segment(0, 0.0, 10.0), segment(1, 10.0, 20.0)],
            false,
            false,
        );
        let plan = planner().plan(&selection);
        assert_eq!(plan.transitions[0].transition_type, TransitionType::Fade);
    }

    #[test]
    fn test_single_segment_empty_plan() {
        let selection =
            SelectionResult::from_segments(vec![segment(0, 0.0, 10.0)], false, false);
        let plan = planner().plan(&selection);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_custom_effect() {
        let selection = SelectionResult::from_segments(
            vec![segment(0, 0.0, 10.0), segment(0, 50.0, 60.0)],
            false,
            false,
        );
        let plan = TransitionPlanner::new(TransitionType::Dissolve, 0.25).plan(&selection);
        assert_eq!(plan.transitions[0].transition_type, TransitionType::Dissolve);
        assert!((plan.transitions[0].duration - 0.25).abs() < 1e-9);
    }
}
