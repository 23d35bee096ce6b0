//! Vidsonic Media Sources
//!
//! Contracts for already-decoded media, consumed by the extractors:
//! - **FrameSource:** Sequential access to decoded video frames
//! - **AudioSource:** Sequential access to raw PCM sample blocks
//!
//! Container and codec decoding happen outside this workspace. The bundled
//! readers only consume formats that need no decoding: raw RGB24 frame dumps
//! and PCM WAV files. Sources release their handles on drop.

pub mod frame;
pub mod memory;
pub mod raw_video;
pub mod wav;

pub use frame::PixelFrame;
pub use memory::{MemoryAudioSource, MemoryFrameSource};
pub use raw_video::{RawVideoSource, RawVideoSpec};
pub use wav::{WavAudioSource, WavFile};

use vidsonic_common::error::{VidsonicError, VidsonicResult};

/// A decoded video stream read front to back.
pub trait FrameSource {
    /// Number of frames the stream declares.
    fn frame_count(&self) -> usize;

    /// Declared frame rate. May be 0 when the container does not say.
    fn frame_rate(&self) -> f64;

    /// Read the next frame. `None` means end-of-stream or an undecodable frame.
    fn read_frame(&mut self) -> Option<PixelFrame>;
}

/// A decoded PCM audio stream read front to back.
pub trait AudioSource {
    fn channels(&self) -> u16;

    fn sample_width(&self) -> SampleWidth;

    /// Number of audio frames (one sample per channel each).
    fn total_frames(&self) -> usize;

    /// Read up to `n` audio frames as interleaved little-endian sample bytes.
    /// Returns fewer bytes (possibly none) near the end or on a read error.
    fn read_frames(&mut self, n: usize) -> Vec<u8>;
}

/// On-disk width of one PCM sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    /// 8-bit unsigned, centred on 128.
    U8,
    /// 16-bit signed little-endian.
    I16,
    /// 32-bit signed little-endian.
    I32,
}

impl SampleWidth {
    pub fn from_bytes(bytes: usize) -> VidsonicResult<Self> {
        match bytes {
            1 => Ok(Self::U8),
            2 => Ok(Self::I16),
            4 => Ok(Self::I32),
            other => Err(VidsonicError::unsupported(format!(
                "{other}-byte PCM samples are not supported (expected 1, 2 or 4)"
            ))),
        }
    }

    pub fn bytes(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 => 2,
            Self::I32 => 4,
        }
    }
}

/// Opens a fresh frame source. Each extractor run gets its own handle.
pub trait FrameSourceOpener {
    fn open(&self) -> VidsonicResult<Box<dyn FrameSource>>;
}

/// Opens a fresh audio source.
pub trait AudioSourceOpener {
    fn open(&self) -> VidsonicResult<Box<dyn AudioSource>>;
}

impl<F> FrameSourceOpener for F
where
    F: Fn() -> VidsonicResult<Box<dyn FrameSource>>,
{
    fn open(&self) -> VidsonicResult<Box<dyn FrameSource>> {
        self()
    }
}

impl<F> AudioSourceOpener for F
where
    F: Fn() -> VidsonicResult<Box<dyn AudioSource>>,
{
    fn open(&self) -> VidsonicResult<Box<dyn AudioSource>> {
        self()
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn frame_count(&self) -> usize {
        (**self).frame_count()
    }

    fn frame_rate(&self) -> f64 {
        (**self).frame_rate()
    }

    fn read_frame(&mut self) -> Option<PixelFrame> {
        (**self).read_frame()
    }
}

impl<S: AudioSource + ?Sized> AudioSource for Box<S> {
    fn channels(&self) -> u16 {
        (**self).channels()
    }

    fn sample_width(&self) -> SampleWidth {
        (**self).sample_width()
    }

    fn total_frames(&self) -> usize {
        (**self).total_frames()
    }

    fn read_frames(&mut self, n: usize) -> Vec<u8> {
        (**self).read_frames(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_width_from_bytes() {
        assert_eq!(SampleWidth::from_bytes(1).unwrap(), SampleWidth::U8);
        assert_eq!(SampleWidth::from_bytes(2).unwrap(), SampleWidth::I16);
        assert_eq!(SampleWidth::from_bytes(4).unwrap().bytes(), 4);
        assert!(SampleWidth::from_bytes(3).is_err());
    }

    #[test]
    fn test_closure_opener_yields_fresh_sources() {
        let opener = || -> VidsonicResult<Box<dyn FrameSource>> {
            Ok(Box::new(MemoryFrameSource::new(
                vec![PixelFrame::filled(1, 1, [1, 2, 3])],
                30.0,
            )))
        };

        let mut first = opener.open().unwrap();
        assert!(first.read_frame().is_some());
        assert!(first.read_frame().is_none());

        let mut second = opener.open().unwrap();
        assert!(second.read_frame().is_some());
    }
}
