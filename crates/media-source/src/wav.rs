//! PCM WAV audio source backed by `hound`.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use vidsonic_common::error::{VidsonicError, VidsonicResult};

use crate::{AudioSource, AudioSourceOpener, SampleWidth};

/// A WAV file to open on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavFile {
    pub path: PathBuf,
}

impl WavFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AudioSourceOpener for WavFile {
    fn open(&self) -> VidsonicResult<Box<dyn AudioSource>> {
        Ok(Box::new(WavAudioSource::open(&self.path)?))
    }
}

/// Sequential reader over the PCM data chunk of a WAV file.
///
/// Samples are handed out in their on-disk layout: 8-bit unsigned, or
/// 16/32-bit signed little-endian.
pub struct WavAudioSource {
    reader: hound::WavReader<BufReader<File>>,
    channels: u16,
    width: SampleWidth,
    total_frames: usize,
}

impl WavAudioSource {
    pub fn open(path: impl Into<PathBuf>) -> VidsonicResult<Self> {
        let path = path.into();
        let reader = hound::WavReader::open(&path)
            .map_err(|e| VidsonicError::source_open(&path, e.to_string()))?;
        let spec = reader.spec();

        if spec.sample_format != hound::SampleFormat::Int {
            return Err(VidsonicError::source_open(
                &path,
                "floating-point WAV data is not supported",
            ));
        }
        if spec.bits_per_sample % 8 != 0 {
            return Err(VidsonicError::source_open(
                &path,
                format!("{}-bit samples are not byte aligned", spec.bits_per_sample),
            ));
        }
        let width = SampleWidth::from_bytes(spec.bits_per_sample as usize / 8)
            .map_err(|e| VidsonicError::source_open(&path, e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            channels = spec.channels,
            sample_rate = spec.sample_rate,
            bits = spec.bits_per_sample,
            frames = reader.duration(),
            "Opened WAV audio"
        );

        Ok(Self {
            total_frames: reader.duration() as usize,
            channels: spec.channels,
            width,
            reader,
        })
    }
}

impl AudioSource for WavAudioSource {
    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_width(&self) -> SampleWidth {
        self.width
    }

    fn total_frames(&self) -> usize {
        self.total_frames
    }

    fn read_frames(&mut self, n: usize) -> Vec<u8> {
        let wanted = n.saturating_mul(self.channels as usize);
        let mut bytes = Vec::with_capacity(wanted * self.width.bytes());

        for sample in self.reader.samples::<i32>().take(wanted) {
            let sample = match sample {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(error = %e, "WAV sample read failed");
                    break;
                }
            };
            // hound recentres 8-bit data to signed; undo that to keep the on-disk layout.
            match self.width {
                SampleWidth::U8 => bytes.push((sample + 128) as u8),
                SampleWidth::I16 => bytes.extend_from_slice(&(sample as i16).to_le_bytes()),
                SampleWidth::I32 => bytes.extend_from_slice(&sample.to_le_bytes()),
            }
        }

        bytes
    }
}
