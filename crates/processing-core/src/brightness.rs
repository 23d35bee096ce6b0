//! Brightness: the sum of every channel sample in a frame.

use vidsonic_media_source::FrameSource;
use vidsonic_metric_model::SENTINEL;

/// One value per declared frame. Undecodable frames yield the sentinel and
/// the scan continues up to the declared count.
pub fn brightness<S: FrameSource + ?Sized>(source: &mut S) -> Vec<f64> {
    let frame_count = source.frame_count();
    let mut values = Vec::with_capacity(frame_count);
    let mut failed = 0usize;

    for index in 0..frame_count {
        match source.read_frame() {
            Some(frame) => values.push(frame_sum(frame.data()) as f64),
            None => {
                tracing::warn!(index, "Brightness: frame could not be read");
                failed += 1;
                values.push(SENTINEL);
            }
        }
    }

    tracing::debug!(frame_count, failed, "Brightness extracted");
    values
}

/// Sum of all samples. `u64` holds `width * height * channels * 255` for any real frame.
pub(crate) fn frame_sum(data: &[u8]) -> u64 {
    data.iter().map(|&v| v as u64).sum()
}
