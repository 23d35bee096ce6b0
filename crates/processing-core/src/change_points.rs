//! Change-point detection on a metric series.
//!
//! A change point is recorded each time the series reaches a fraction of its
//! maximum more than `min_run` indices after the last recorded marker. The
//! result always starts at `0` and ends at `len - 1`, so consecutive entries
//! split the whole series into segments.

use vidsonic_common::error::{VidsonicError, VidsonicResult};
use vidsonic_metric_model::ChangePointSet;

/// Default cutoff as a fraction of the series maximum.
pub const DEFAULT_RATIO: f64 = 0.3;

/// Default minimum distance between markers.
pub const DEFAULT_MIN_RUN: usize = 30;

/// Detect change points with the default cutoff ratio and spacing.
pub fn detect_change_points(data: &[f64]) -> VidsonicResult<ChangePointSet> {
    change_points(data, DEFAULT_RATIO, DEFAULT_MIN_RUN)
}

/// Detect change points with an explicit cutoff ratio and minimum run length.
pub fn change_points(data: &[f64], ratio: f64, min_run: usize) -> VidsonicResult<ChangePointSet> {
    if data.is_empty() {
        return Err(VidsonicError::degenerate(
            "change_points",
            "cannot detect change points in an empty series",
        ));
    }

    let peak = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let cutoff = peak * ratio;
    let last_index = data.len() - 1;

    let mut points = Vec::new();
    let mut marker = 0usize;
    for (i, &value) in data.iter().enumerate().skip(1) {
        if value >= cutoff && i - marker > min_run {
            points.push(marker);
            marker = i;
        }
    }

    if points.first() != Some(&0) {
        points.insert(0, 0);
    }
    if points.last() != Some(&last_index) {
        points.push(last_index);
    }

    tracing::debug!(len = data.len(), cutoff, found = points.len(), "Change points detected");
    Ok(ChangePointSet::from_sorted(points))
}
