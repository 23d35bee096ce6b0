//! Contrast: total absolute per-channel change between consecutive frames.

use vidsonic_media_source::{FrameSource, PixelFrame};
use vidsonic_metric_model::SENTINEL;

/// One value per frame after the first (`frame_count - 1` values).
///
/// A failed read yields the sentinel and keeps the last good frame as the
/// comparison basis, so the next good frame is measured against it.
pub fn contrast<S: FrameSource + ?Sized>(source: &mut S) -> Vec<f64> {
    let frame_count = source.frame_count();
    if frame_count == 0 {
        return Vec::new();
    }

    let mut previous = source.read_frame();
    if previous.is_none() {
        tracing::warn!(index = 0, "Contrast: first frame could not be read");
    }

    let mut values = Vec::with_capacity(frame_count - 1);
    let mut failed = 0usize;

    for index in 1..frame_count {
        let Some(current) = source.read_frame() else {
            tracing::warn!(index, "Contrast: frame could not be read");
            failed += 1;
            values.push(SENTINEL);
            continue;
        };

        match previous.as_ref() {
            Some(prev) if prev.same_shape(&current) => {
                values.push(abs_diff_sum(prev, &current) as f64);
            }
            Some(_) => {
                tracing::warn!(index, "Contrast: frame geometry changed");
                failed += 1;
                values.push(SENTINEL);
            }
            None => {
                failed += 1;
                values.push(SENTINEL);
            }
        }
        previous = Some(current);
    }

    tracing::debug!(frame_count, failed, "Contrast extracted");
    values
}

/// Sum of `|b - a|` over every sample, computed in signed arithmetic.
fn abs_diff_sum(a: &PixelFrame, b: &PixelFrame) -> u64 {
    a.data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| (y as i16 - x as i16).unsigned_abs() as u64)
        .sum()
}
