//! In-memory sources for embedding callers and tests.

use std::collections::VecDeque;

use crate::{AudioSource, FrameSource, PixelFrame, SampleWidth};

/// Frames held in memory. A `None` slot reads as an undecodable frame.
#[derive(Debug, Clone)]
pub struct MemoryFrameSource {
    frames: VecDeque<Option<PixelFrame>>,
    declared: usize,
    fps: f64,
}

impl MemoryFrameSource {
    pub fn new(frames: Vec<PixelFrame>, fps: f64) -> Self {
        Self::with_gaps(frames.into_iter().map(Some).collect(), fps)
    }

    /// Frames where `None` marks a slot that fails to decode.
    pub fn with_gaps(frames: Vec<Option<PixelFrame>>, fps: f64) -> Self {
        let declared = frames.len();
        Self {
            frames: frames.into(),
            declared,
            fps,
        }
    }

    /// Override the declared frame count, e.g. a header that over-reports.
    pub fn declare_frame_count(mut self, count: usize) -> Self {
        self.declared = count;
        self
    }
}

impl FrameSource for MemoryFrameSource {
    fn frame_count(&self) -> usize {
        self.declared
    }

    fn frame_rate(&self) -> f64 {
        self.fps
    }

    fn read_frame(&mut self) -> Option<PixelFrame> {
        self.frames.pop_front().flatten()
    }
}

/// Interleaved PCM bytes held in memory.
#[derive(Debug, Clone)]
pub struct MemoryAudioSource {
    channels: u16,
    width: SampleWidth,
    bytes: Vec<u8>,
    cursor: usize,
}

impl MemoryAudioSource {
    pub fn new(channels: u16, width: SampleWidth, bytes: Vec<u8>) -> Self {
        Self {
            channels: channels.max(1),
            width,
            bytes,
            cursor: 0,
        }
    }

    /// 16-bit source built from signed samples.
    pub fn from_i16(channels: u16, samples: &[i16]) -> Self {
        let bytes = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self::new(channels, SampleWidth::I16, bytes)
    }

    fn frame_bytes(&self) -> usize {
        self.channels as usize * self.width.bytes()
    }
}

impl AudioSource for MemoryAudioSource {
    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_width(&self) -> SampleWidth {
        self.width
    }

    fn total_frames(&self) -> usize {
        self.bytes.len() / self.frame_bytes()
    }

    fn read_frames(&mut self, n: usize) -> Vec<u8> {
        let want = n.saturating_mul(self.frame_bytes());
        let end = self.cursor.saturating_add(want).min(self.bytes.len());
        let chunk = self.bytes[self.cursor..end].to_vec();
        self.cursor = end;
        chunk
    }
}
