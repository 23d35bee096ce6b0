//! Histogram: change in quantized colour occupancy between frames.
//!
//! RGB space is cut into `bins` ranges per channel (`bins^3` cells). Each
//! pixel lands in exactly one cell; a frame's value is the summed absolute
//! difference between its cell counts and those of the previous good frame.

use vidsonic_media_source::{FrameSource, PixelFrame};
use vidsonic_metric_model::SENTINEL;

/// Default number of bins per channel.
pub const DEFAULT_BINS: usize = 8;

/// Whether `bins` cuts 0..=255 into equal ranges.
pub fn bins_supported(bins: usize) -> bool {
    bins > 0 && bins <= 256 && 256 % bins == 0
}

/// Produces `frame_count - 1` values. The retained counts start at zero, so
/// the first value equals the first frame's pixel count.
///
/// An unsupported `bins` makes every frame unreadable, so all values are `-1`.
pub fn histogram<S: FrameSource + ?Sized>(source: &mut S, bins: usize) -> Vec<f64> {
    let frame_count = source.frame_count();
    let steps = frame_count.saturating_sub(1);
    if !bins_supported(bins) {
        tracing::warn!(bins, "Histogram: bin count must divide 256");
    }
    let cells = if bins_supported(bins) { bins.pow(3) } else { 0 };
    let mut previous = vec![0u64; cells];
    let mut values = Vec::with_capacity(steps);
    let mut failed = 0usize;

    for index in 0..steps {
        let counts = source
            .read_frame()
            .and_then(|frame| occupancy(&frame, bins));

        match counts {
            Some(counts) => {
                let delta: u64 = counts
                    .iter()
                    .zip(&previous)
                    .map(|(&c, &p)| c.abs_diff(p))
                    .sum();
                values.push(delta as f64);
                previous = counts;
            }
            None => {
                tracing::warn!(index, "Histogram: frame could not be read");
                failed += 1;
                values.push(SENTINEL);
            }
        }
    }

    tracing::debug!(frame_count, bins, failed, "Histogram extracted");
    values
}

/// Per-cell pixel counts for one frame, or `None` if it is not three-channel
/// or `bins` does not divide 256.
pub fn occupancy(frame: &PixelFrame, bins: usize) -> Option<Vec<u64>> {
    if frame.channels() != 3 || !bins_supported(bins) {
        return None;
    }
    let width = 256 / bins;
    let mut counts = vec![0u64; bins.pow(3)];

    for pixel in frame.pixels() {
        let r = pixel[0] as usize / width;
        let g = pixel[1] as usize / width;
        let b = pixel[2] as usize / width;
        counts[(r * bins + g) * bins + b] += 1;
    }
    Some(counts)
}
