//! Decoded pixel buffers.

use vidsonic_common::error::{VidsonicError, VidsonicResult};

/// One decoded video frame: interleaved, row-major, 8 bits per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFrame {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelFrame {
    /// Wrap a buffer. Fails unless `data.len() == width * height * channels`.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> VidsonicResult<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if channels == 0 || data.len() != expected {
            return Err(VidsonicError::unsupported(format!(
                "pixel buffer of {} bytes does not match {width}x{height}x{channels}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Three-channel frame with every pixel set to `rgb`.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = width as usize * height as usize;
        let data = rgb.iter().copied().cycle().take(pixels * 3).collect();
        Self {
            width,
            height,
            channels: 3,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved samples.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Per-pixel channel slices.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.channels as usize)
    }

    /// Whether `other` has the same geometry, so the two can be compared sample by sample.
    pub fn same_shape(&self, other: &PixelFrame) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        assert!(PixelFrame::new(2, 2, 3, vec![0; 12]).is_ok());
        assert!(PixelFrame::new(2, 2, 3, vec![0; 11]).is_err());
        assert!(PixelFrame::new(2, 2, 0, vec![]).is_err());
    }

    #[test]
    fn test_filled_frame_pixels() {
        let frame = PixelFrame::filled(3, 2, [10, 20, 30]);
        assert_eq!(frame.pixel_count(), 6);
        assert_eq!(frame.data().len(), 18);
        assert!(frame.pixels().all(|p| p == [10, 20, 30]));
    }

    #[test]
    fn test_same_shape() {
        let a = PixelFrame::filled(2, 2, [0, 0, 0]);
        let b = PixelFrame::filled(2, 2, [9, 9, 9]);
        let c = PixelFrame::filled(2, 1, [0, 0, 0]);
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }
}
