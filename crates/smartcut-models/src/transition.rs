//! Transition plan models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Transition effect between two adjacent selected segments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    /// Direct continuation, no effect. Assigned between merged runs.
    #[default]
    None,
    Fade,
    Dissolve,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    ZoomIn,
    ZoomOut,
    WipeLeft,
    WipeRight,
}

impl TransitionType {
    /// All effect types a render collaborator may be asked to produce.
    pub fn all() -> &'static [TransitionType] {
        &[
            TransitionType::None,
            TransitionType::Fade,
            TransitionType::Dissolve,
            TransitionType::SlideLeft,
            TransitionType::SlideRight,
            TransitionType::SlideUp,
            TransitionType::SlideDown,
            TransitionType::ZoomIn,
            TransitionType::ZoomOut,
            TransitionType::WipeLeft,
            TransitionType::WipeRight,
        ]
    }
}

/// One transition descriptor for the boundary between segment `index`
/// and segment `index + 1` of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transition {
    /// Effect to apply at the boundary.
    pub transition_type: TransitionType,

    /// Effect duration in seconds; 0.0 for `None`.
    pub duration: f64,
}

impl Transition {
    pub fn new(transition_type: TransitionType, duration: f64) -> Self {
        Self {
            transition_type,
            duration,
        }
    }

    /// Zero-length no-op transition for contiguous runs.
    pub fn none() -> Self {
        Self {
            transition_type: TransitionType::None,
            duration: 0.0,
        }
    }
}

/// Transition descriptors for every adjacency in a selection.
///
/// `transitions.len() == selection.segment_count().saturating_sub(1)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TransitionPlan {
    pub transitions: Vec<Transition>,
}

impl TransitionPlan {
    pub fn new(transitions: Vec<Transition>) -> Self {
        Self { transitions }
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
