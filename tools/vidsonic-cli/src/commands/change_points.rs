//! Detect change points in one feature of an event file.

use std::path::PathBuf;

use anyhow::Context;
use vidsonic_common::config::AppConfig;
use vidsonic_metric_model::{feature_values, parse_events};
use vidsonic_processing_core::change_points;

pub fn run(config: &AppConfig, events: PathBuf, feature: String, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&events)
        .with_context(|| format!("Events file not found: {}", events.display()))?;
    let parsed = parse_events(&content)
        .with_context(|| format!("Failed to parse events in {}", events.display()))?;

    let values = feature_values(&parsed, &feature);
    tracing::debug!(feature = %feature, values = values.len(), "Loaded feature series");
    if values.is_empty() {
        anyhow::bail!("No '{feature}' events in {}", events.display());
    }

    let cps = change_points(
        &values,
        config.extraction.change_point_ratio,
        config.extraction.change_point_min_run,
    )?;

    if json {
        println!("{}", serde_json::to_string(&cps)?);
        return Ok(());
    }

    println!("Change points in '{feature}' ({} values):", values.len());
    for (start, end) in cps.segments() {
        println!("  {start:>6} .. {end:<6} ({} frames)", end - start);
    }
    if cps.len() == 1 {
        println!("  {:>6}", cps.indices()[0]);
    }

    Ok(())
}
