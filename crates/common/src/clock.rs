//! Timestamp axis for metric event streams.
//!
//! Every series serialized in one invocation shares the same axis: element
//! `i` of each series gets `base + i * step`, so values at the same frame
//! index line up at playback time.

/// A fixed-step millisecond axis anchored at a base timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampAxis {
    base_ms: i64,
    step_ms: i64,
}

impl TimestampAxis {
    /// Anchor the axis at the current wall-clock time.
    pub fn now(step_ms: i64) -> Self {
        Self {
            base_ms: chrono::Utc::now().timestamp_millis(),
            step_ms,
        }
    }

    /// Axis with a known base (deterministic output, tests).
    pub fn fixed(base_ms: i64, step_ms: i64) -> Self {
        Self { base_ms, step_ms }
    }

    /// Timestamp of the element at `index`.
    pub fn at(&self, index: usize) -> i64 {
        self.base_ms + self.step_ms * index as i64
    }

    pub fn base_ms(&self) -> i64 {
        self.base_ms
    }

    pub fn step_ms(&self) -> i64 {
        self.step_ms
    }
}

/// Whole-second duration of a video, `frame_count / fps`.
///
/// Decoders sometimes report 0 fps; `fallback_fps` is used then.
pub fn duration_secs(frame_count: usize, fps: f64, fallback_fps: f64) -> u64 {
    let fps = if fps.is_finite() && fps > 0.0 {
        fps
    } else {
        fallback_fps
    };
    (frame_count as f64 / fps) as u64
}
