//! Reader for raw RGB24 frame dumps.
//!
//! An external decoder writes every frame back to back as `width * height * 3`
//! bytes (for example `ffmpeg -i in.mp4 -f rawvideo -pix_fmt rgb24 out.rgb`).
//! The frame geometry and rate are not stored in the dump, so the caller
//! supplies them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use vidsonic_common::error::{VidsonicError, VidsonicResult};

use crate::{FrameSource, FrameSourceOpener, PixelFrame};

const CHANNELS: u8 = 3;

/// Location and geometry of a raw RGB24 dump.
#[derive(Debug, Clone, PartialEq)]
pub struct RawVideoSpec {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl RawVideoSpec {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32, fps: f64) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            fps,
        }
    }

    pub fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * CHANNELS as usize
    }
}

impl FrameSourceOpener for RawVideoSpec {
    fn open(&self) -> VidsonicResult<Box<dyn FrameSource>> {
        Ok(Box::new(RawVideoSource::open(self.clone())?))
    }
}

/// Sequential frame reader over a raw RGB24 dump.
pub struct RawVideoSource {
    spec: RawVideoSpec,
    reader: BufReader<File>,
    frame_count: usize,
}

impl RawVideoSource {
    pub fn open(spec: RawVideoSpec) -> VidsonicResult<Self> {
        if spec.width == 0 || spec.height == 0 {
            return Err(VidsonicError::source_open(
                &spec.path,
                format!("invalid frame size {}x{}", spec.width, spec.height),
            ));
        }

        let file = File::open(&spec.path)
            .map_err(|e| VidsonicError::source_open(&spec.path, e.to_string()))?;
        let len = file
            .metadata()
            .map_err(|e| VidsonicError::source_open(&spec.path, e.to_string()))?
            .len() as usize;

        let frame_count = len / spec.frame_bytes();
        if len % spec.frame_bytes() != 0 {
            tracing::warn!(
                path = %spec.path.display(),
                trailing_bytes = len % spec.frame_bytes(),
                "Raw video size is not a whole number of frames"
            );
        }

        tracing::debug!(
            path = %spec.path.display(),
            width = spec.width,
            height = spec.height,
            frame_count,
            "Opened raw video"
        );

        Ok(Self {
            spec,
            reader: BufReader::new(file),
            frame_count,
        })
    }

    pub fn spec(&self) -> &RawVideoSpec {
        &self.spec
    }
}

impl FrameSource for RawVideoSource {
    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn frame_rate(&self) -> f64 {
        self.spec.fps
    }

    fn read_frame(&mut self) -> Option<PixelFrame> {
        let mut data = vec![0u8; self.spec.frame_bytes()];
        if let Err(e) = self.reader.read_exact(&mut data) {
            tracing::debug!(error = %e, "Raw video frame read failed");
            return None;
        }
        PixelFrame::new(self.spec.width, self.spec.height, CHANNELS, data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dump(frames: &[[u8; 3]], width: u32, height: u32) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for rgb in frames {
            let frame = PixelFrame::filled(width, height, *rgb);
            file.write_all(frame.data()).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_every_frame_then_ends() {
        let dump = write_dump(&[[1, 2, 3], [4, 5, 6]], 4, 2);
        let mut source = RawVideoSpec::new(dump.path(), 4, 2, 30.0).open().unwrap();

        assert_eq!(source.frame_count(), 2);
        assert_eq!(source.frame_rate(), 30.0);
        assert!(source.read_frame().unwrap().pixels().all(|p| p == [1, 2, 3]));
        assert!(source.read_frame().unwrap().pixels().all(|p| p == [4, 5, 6]));
        assert!(source.read_frame().is_none());
    }

    #[test]
    fn test_missing_file_is_open_failure() {
        let err = RawVideoSource::open(RawVideoSpec::new("/nonexistent/video.rgb", 4, 4, 25.0))
            .err()
            .unwrap();
        assert!(matches!(err, VidsonicError::SourceOpen { .. }));
    }

    #[test]
    fn test_zero_geometry_rejected() {
        let dump = write_dump(&[[0, 0, 0]], 1, 1);
        assert!(RawVideoSource::open(RawVideoSpec::new(dump.path(), 0, 1, 25.0)).is_err());
    }
}
