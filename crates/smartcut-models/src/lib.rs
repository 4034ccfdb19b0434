//! Shared data models for the SmartCut highlight engine.
//!
//! This crate provides Serde-serializable types for:
//! - Scored segments and their per-modality feature vectors
//! - Scoring weight configuration
//! - Selection results with duration-bound flags
//! - Transition plans for the render collaborator

pub mod features;
pub mod segment;
pub mod selection;
pub mod transition;
pub mod weights;

// Re-export common types
pub use features::{AudioFeatures, VideoFeatures};
pub use segment::{Segment, SourceId};
pub use selection::SelectionResult;
pub use transition::{Transition, TransitionPlan, TransitionType};
pub use weights::{AudioSubWeights, ScoringWeights, VideoSubWeights};
