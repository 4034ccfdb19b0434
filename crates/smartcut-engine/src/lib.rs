//! Highlight detection and clip selection engine.
//!
//! This crate provides:
//! - Per-window audio and video feature extraction
//! - Pluggable composite interest scoring
//! - Duration-bounded greedy segment selection
//! - Transition planning for the render collaborator
//!
//! Media decoding is an external collaborator behind the [`MediaSource`]
//! trait; the engine only ever sees decoded waveforms and frames.

pub mod audio;
pub mod cache;
pub mod config;
pub mod error;
pub mod scorer;
pub mod selector;
pub mod source;
pub mod transitions;
pub mod video;

pub use audio::AudioFeatureExtractor;
pub use cache::{cache_key, FeatureCache, MemoryCache, NoopCache, EXTRACTOR_VERSION};
pub use config::{DetectionConfig, Sensitivity};
pub use error::{EngineError, EngineResult};
pub use scorer::{time_score, ScoringStrategy, WeightedSumScorer};
pub use selector::SegmentSelector;
pub use source::{AudioWindow, MediaSource, TimeWindow, VideoFrame};
pub use transitions::TransitionPlanner;
pub use video::VideoFeatureExtractor;
