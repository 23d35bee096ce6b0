//! Show video source information.

use std::path::PathBuf;

use vidsonic_common::config::AppConfig;
use vidsonic_media_source::RawVideoSpec;
use vidsonic_processing_core::ExtractionPipeline;

pub fn run(config: &AppConfig, video: PathBuf, width: u32, height: u32, fps: f64) -> anyhow::Result<()> {
    let pipeline = ExtractionPipeline::new(config.extraction.clone())?;
    let info = pipeline.probe(&RawVideoSpec::new(&video, width, height, fps))?;

    println!("Video: {}", video.display());
    println!("  Resolution: {width}x{height}");
    println!("  Frames: {}", info.frame_count);
    if info.frame_rate > 0.0 {
        println!("  Frame rate: {}fps", info.frame_rate);
    } else {
        println!(
            "  Frame rate: unknown (assuming {}fps)",
            config.extraction.fallback_fps
        );
    }
    println!("  Duration: {}s", info.duration_secs);

    Ok(())
}
