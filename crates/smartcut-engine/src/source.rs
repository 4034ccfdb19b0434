//! Decoded media access collaborator.
//!
//! The engine never touches codecs or containers. Collaborators implement
//! [`MediaSource`] to hand over decoded audio waveforms and RGB frames for
//! the windows the engine asks about.

use async_trait::async_trait;

use crate::error::EngineResult;

/// Half-open time window `[start, end)` in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the window, used for the time-position score.
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Decoded mono audio for one window.
#[derive(Debug, Clone)]
pub struct AudioWindow {
    /// Mono samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,

    /// Samples per second.
    pub sample_rate: u32,
}

impl AudioWindow {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// One decoded RGB24 frame.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Presentation timestamp in seconds.
    pub timestamp: f64,

    pub width: u32,
    pub height: u32,

    /// Raw RGB pixel data, 3 bytes per pixel, row-major.
    pub rgb: Vec<u8>,
}

impl VideoFrame {
    pub fn new(timestamp: f64, width: u32, height: u32, rgb: Vec<u8>) -> Self {
        Self {
            timestamp,
            width,
            height,
            rgb,
        }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }
}

/// Access to one decoded source media item.
///
/// Implementations must be deterministic for identical windows; the
/// feature cache relies on it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Total duration of the source in seconds.
    async fn duration(&self) -> EngineResult<f64>;

    /// Decoded mono audio for the window.
    async fn audio_window(&self, window: TimeWindow) -> EngineResult<AudioWindow>;

    /// Decoded frames at known timestamps inside the window, in
    /// presentation order.
    async fn video_frames(&self, window: TimeWindow) -> EngineResult<Vec<VideoFrame>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_midpoint() {
        let w = TimeWindow::new(10.0, 20.0);
        assert!((w.midpoint() - 15.0).abs() < 1e-9);
        assert!((w.duration() - 10.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_mock_source() {
        let mut source = MockMediaSource::new();
        source.expect_duration().returning(|| Ok(30.0));
        assert!((source.duration().await.unwrap() - 30.0).abs() < 1e-9);
    }
}
