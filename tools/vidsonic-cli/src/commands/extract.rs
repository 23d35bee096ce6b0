//! Extract metrics from a video and write the event file.

use std::path::PathBuf;

use vidsonic_common::config::AppConfig;
use vidsonic_media_source::{AudioSourceOpener, RawVideoSpec, WavFile};
use vidsonic_processing_core::ExtractionPipeline;

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &AppConfig,
    video: PathBuf,
    width: u32,
    height: u32,
    fps: f64,
    audio: Option<PathBuf>,
    output: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| video.with_extension("json"));
    let spec = RawVideoSpec::new(&video, width, height, fps);
    let pipeline = ExtractionPipeline::new(config.extraction.clone())?;

    if output.exists() && !force {
        let info = pipeline.probe(&spec)?;
        println!(
            "Metrics already present at {} (use --force to recompute)",
            output.display()
        );
        println!("Duration: {}s", info.duration_secs);
        return Ok(());
    }

    println!("Extracting metrics from: {}", video.display());
    let wav = audio.map(WavFile::new);
    let report = pipeline.run(&spec, wav.as_ref().map(|w| w as &dyn AudioSourceOpener))?;

    for series in &report.series {
        let failed = series.sentinel_positions().len();
        println!(
            "  {:<10} {} values{}",
            series.feature,
            series.len(),
            if failed > 0 {
                format!(" ({failed} unreadable)")
            } else {
                String::new()
            }
        );
    }

    let written = report.write(&output, &config.events)?;
    println!("  Wrote {written} events to {}", output.display());
    println!("Duration: {}s", report.video.duration_secs);

    Ok(())
}
