//! End-to-end metric extraction over one video and its audio track.
//!
//! Every extractor opens its own source through the supplied opener, so no
//! read cursor is shared between them; each handle is dropped as soon as its
//! extractor returns, on success or error.

use std::path::PathBuf;

use vidsonic_common::clock::{duration_secs, TimestampAxis};
use vidsonic_common::config::{EventConfig, ExtractionConfig};
use vidsonic_common::error::VidsonicResult;
use vidsonic_media_source::{AudioSourceOpener, FrameSource, FrameSourceOpener};
use vidsonic_metric_model::{Feature, MetricSeries};

use crate::serialize::write_events;
use crate::{amplitude, brightness, contrast, histogram, joint};

/// Basic properties of a video source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub frame_count: usize,
    pub frame_rate: f64,
    /// Whole seconds, with the fallback rate applied for 0 fps.
    pub duration_secs: u64,
}

/// All series extracted from one video.
#[derive(Debug, Clone)]
pub struct MetricReport {
    pub video: VideoInfo,
    /// In output order: brightness, histogram, amplitude (if audio), contrast, joint.
    pub series: Vec<MetricSeries>,
}

impl MetricReport {
    pub fn get(&self, feature: Feature) -> Option<&MetricSeries> {
        self.series.iter().find(|s| s.feature == feature.as_str())
    }

    pub fn write(&self, path: impl Into<PathBuf>, events: &EventConfig) -> VidsonicResult<u64> {
        write_events(
            path,
            &self.series,
            TimestampAxis::now(events.step_ms),
            &events.system,
        )
    }
}

/// Runs the extractors in sequence and assembles a [`MetricReport`].
#[derive(Debug, Clone)]
pub struct ExtractionPipeline {
    config: ExtractionConfig,
}

impl ExtractionPipeline {
    pub fn new(config: ExtractionConfig) -> VidsonicResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Read frame count and rate without scanning frames.
    pub fn probe(&self, video: &dyn FrameSourceOpener) -> VidsonicResult<VideoInfo> {
        let source = video.open()?;
        let frame_count = source.frame_count();
        let frame_rate = source.frame_rate();
        Ok(VideoInfo {
            frame_count,
            frame_rate,
            duration_secs: duration_secs(frame_count, frame_rate, self.config.fallback_fps),
        })
    }

    /// Extract every series for one video.
    ///
    /// The joint series needs a positive peak in brightness, histogram and
    /// contrast. A static or single-frame clip has none in contrast, and the
    /// whole run then fails with `DegenerateInput` before any series is returned.
    pub fn run(
        &self,
        video: &dyn FrameSourceOpener,
        audio: Option<&dyn AudioSourceOpener>,
    ) -> VidsonicResult<MetricReport> {
        let info = self.probe(video)?;
        tracing::info!(
            frames = info.frame_count,
            fps = info.frame_rate,
            duration_secs = info.duration_secs,
            "Starting metric extraction"
        );

        tracing::info!("Extracting histogram");
        let histogram_values = histogram(&mut video.open()?, self.config.histogram_bins);

        let amplitude_values = match audio {
            Some(opener) => {
                tracing::info!("Extracting amplitude");
                Some(amplitude(&mut opener.open()?, info.frame_count)?)
            }
            None => {
                tracing::info!("No audio track supplied, skipping amplitude");
                None
            }
        };

        tracing::info!("Extracting brightness");
        let brightness_values = brightness(&mut video.open()?);

        tracing::info!("Extracting contrast");
        let contrast_values = contrast(&mut video.open()?);

        tracing::info!("Combining joint metric");
        let joint_values = joint(&[
            brightness_values.as_slice(),
            histogram_values.as_slice(),
            contrast_values.as_slice(),
        ])?;

        let mut series = vec![
            MetricSeries::of(Feature::Brightness, brightness_values),
            MetricSeries::of(Feature::Histogram, histogram_values),
        ];
        if let Some(values) = amplitude_values {
            series.push(MetricSeries::of(Feature::Amplitude, values));
        }
        series.push(MetricSeries::of(Feature::Contrast, contrast_values));
        series.push(MetricSeries::of(Feature::Joint, joint_values));

        tracing::info!(series = series.len(), "Metric extraction complete");
        Ok(MetricReport {
            video: info,
            series,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidsonic_common::error::VidsonicError;
    use vidsonic_media_source::{
        AudioSource, FrameSource, MemoryAudioSource, MemoryFrameSource, PixelFrame,
    };

    fn video() -> impl Fn() -> VidsonicResult<Box<dyn FrameSource>> {
        || {
            Ok(Box::new(MemoryFrameSource::new(
                vec![
                    PixelFrame::filled(2, 2, [10, 10, 10]),
                    PixelFrame::filled(2, 2, [200, 10, 10]),
                    PixelFrame::filled(2, 2, [10, 10, 10]),
                ],
                0.0,
            )) as Box<dyn FrameSource>)
        }
    }

    fn audio() -> impl Fn() -> VidsonicResult<Box<dyn AudioSource>> {
        || Ok(Box::new(MemoryAudioSource::from_i16(1, &[-7; 9])) as Box<dyn AudioSource>)
    }

    #[test]
    fn test_report_order_and_lengths() {
        let pipeline = ExtractionPipeline::with_defaults();
        let report = pipeline.run(&video(), Some(&audio())).unwrap();

        let names: Vec<&str> = report.series.iter().map(|s| s.feature.as_str()).collect();
        assert_eq!(names, ["brightness", "histogram", "amplitude", "contrast", "joint"]);

        assert_eq!(report.get(Feature::Brightness).unwrap().len(), 3);
        assert_eq!(report.get(Feature::Amplitude).unwrap().values, vec![7.0; 3]);
        assert_eq!(report.get(Feature::Contrast).unwrap().len(), 2);
        assert_eq!(report.get(Feature::Histogram).unwrap().len(), 2);
        assert_eq!(report.get(Feature::Joint).unwrap().len(), 3);
    }

    #[test]
    fn test_zero_fps_uses_fallback_duration() {
        let long_video = || -> VidsonicResult<Box<dyn FrameSource>> {
            Ok(Box::new(MemoryFrameSource::new(
                vec![PixelFrame::filled(1, 1, [1, 2, 3]); 250],
                0.0,
            )) as Box<dyn FrameSource>)
        };
        let pipeline = ExtractionPipeline::with_defaults();
        let info = pipeline.probe(&long_video).unwrap();
        assert_eq!(info.frame_count, 250);
        assert_eq!(info.frame_rate, 0.0);
        assert_eq!(info.duration_secs, 10);

        let config = ExtractionConfig {
            fallback_fps: 50.0,
            ..Default::default()
        };
        let info = ExtractionPipeline::new(config)
            .unwrap()
            .probe(&long_video)
            .unwrap();
        assert_eq!(info.duration_secs, 5);
    }

    #[test]
    fn test_static_clip_fails_on_joint() {
        let still = || -> VidsonicResult<Box<dyn FrameSource>> {
            Ok(Box::new(MemoryFrameSource::new(
                vec![PixelFrame::filled(2, 2, [10, 10, 10]); 3],
                25.0,
            )) as Box<dyn FrameSource>)
        };
        let err = ExtractionPipeline::with_defaults()
            .run(&still, None)
            .unwrap_err();
        match err {
            VidsonicError::DegenerateInput { operation, message } => {
                assert_eq!(operation, "joint");
                assert!(message.starts_with("series 2 "), "{message}");
            }
            other => panic!("expected degenerate input, got {other:?}"),
        }
    }

    #[test]
    fn test_audio_is_optional() {
        let report = ExtractionPipeline::with_defaults().run(&video(), None).unwrap();
        assert!(report.get(Feature::Amplitude).is_none());
        assert_eq!(report.series.len(), 4);
    }

    #[test]
    fn test_open_failure_surfaces() {
        let failing = || -> VidsonicResult<Box<dyn FrameSource>> {
            Err(VidsonicError::source_open("missing.rgb", "no such file"))
        };
        let err = ExtractionPipeline::with_defaults()
            .run(&failing, None)
            .unwrap_err();
        assert!(matches!(err, VidsonicError::SourceOpen { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractionConfig {
            histogram_bins: 3,
            ..Default::default()
        };
        assert!(ExtractionPipeline::new(config).is_err());
    }
}
