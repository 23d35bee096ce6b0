//! Validate a track settings file.

use std::path::PathBuf;

use vidsonic_metric_model::{active_tracks, load_track_settings};

pub fn run(settings: PathBuf) -> anyhow::Result<()> {
    let tracks = load_track_settings(&settings)?;
    let active = active_tracks(&tracks);

    println!(
        "Tracks: {} ({} active, {} muted)",
        tracks.len(),
        active.len(),
        tracks.len() - active.len()
    );
    for track in active {
        println!(
            "  {:<10} instrument {} ({:?}), controls {:?}, scale {:?}",
            track.feature,
            track.instrument.index(),
            track.instrument,
            track.controls,
            track.scale
        );
    }

    Ok(())
}
