//! Feature cache collaborator.
//!
//! Extraction is deterministic, so cached feature vectors keyed by
//! content hash make re-runs idempotent and cheap. The engine stays free
//! of storage lifecycle concerns: callers hand in whatever
//! [`FeatureCache`] implementation suits them (Redis, disk, nothing).

use std::collections::HashMap;
use std::sync::Mutex;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use smartcut_models::{AudioFeatures, SourceId, VideoFeatures};

use crate::source::TimeWindow;

/// Bumped whenever extractor behavior changes, invalidating old entries.
pub const EXTRACTOR_VERSION: u32 = 1;

/// Cached per-window extraction output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedFeatures {
    pub audio: AudioFeatures,
    pub video: VideoFeatures,
}

/// Content-hash cache key for one `(source, window, extractor)` tuple.
///
/// Window bounds are quantized to milliseconds so float formatting can
/// never split the keyspace.
pub fn cache_key(source_id: &SourceId, window: TimeWindow, version: u32) -> String {
    let start_ms = (window.start * 1000.0).round() as i64;
    let end_ms = (window.end * 1000.0).round() as i64;

    let mut hasher = Sha256::new();
    hasher.update(source_id.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(start_ms.to_le_bytes());
    hasher.update(end_ms.to_le_bytes());
    hasher.update(version.to_le_bytes());

    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Key-value store for extracted features.
pub trait FeatureCache: Send + Sync {
    fn get(&self, key: &str) -> Option<CachedFeatures>;
    fn put(&self, key: &str, features: CachedFeatures);
}

/// Cache that stores nothing. The default.
#[derive(Debug, Default)]
pub struct NoopCache;

impl FeatureCache for NoopCache {
    fn get(&self, _key: &str) -> Option<CachedFeatures> {
        None
    }

    fn put(&self, _key: &str, _features: CachedFeatures) {}
}

/// In-process cache for tests and single-run reuse.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CachedFeatures>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FeatureCache for MemoryCache {
    fn get(&self, key: &str) -> Option<CachedFeatures> {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .get(key)
            .copied()
    }

    fn put(&self, key: &str, features: CachedFeatures) {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key.to_string(), features);
    }
}
