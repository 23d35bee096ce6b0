//! Amplitude: mean absolute sample value per video frame's worth of audio.

use vidsonic_common::error::{VidsonicError, VidsonicResult};
use vidsonic_media_source::{AudioSource, SampleWidth};
use vidsonic_metric_model::SENTINEL;

/// Splits the audio into `frame_count` equal chunks of
/// `total_frames / frame_count` audio frames and averages the absolute
/// sample values of each (all channels together), rounded to 3 decimals.
///
/// The `total_frames % frame_count` tail is never read. A chunk that yields
/// no samples gets the sentinel.
pub fn amplitude<S: AudioSource + ?Sized>(
    source: &mut S,
    frame_count: usize,
) -> VidsonicResult<Vec<f64>> {
    if frame_count == 0 {
        return Err(VidsonicError::degenerate(
            "amplitude",
            "video has no frames to align audio chunks with",
        ));
    }

    let width = source.sample_width();
    let per_frame = source.total_frames() / frame_count;
    let mut values = Vec::with_capacity(frame_count);
    let mut failed = 0usize;

    for index in 0..frame_count {
        let chunk = source.read_frames(per_frame);
        match mean_abs(&chunk, width) {
            Some(mean) => values.push(round3(mean)),
            None => {
                if per_frame > 0 {
                    tracing::warn!(index, "Amplitude: audio chunk could not be read");
                }
                failed += 1;
                values.push(SENTINEL);
            }
        }
    }

    tracing::debug!(
        frame_count,
        samples_per_frame = per_frame,
        channels = source.channels(),
        failed,
        "Amplitude extracted"
    );
    Ok(values)
}

/// Mean of `|sample|`; 8-bit data is recentred (`value - 128`) first.
fn mean_abs(bytes: &[u8], width: SampleWidth) -> Option<f64> {
    let (sum, count) = match width {
        SampleWidth::U8 => bytes.iter().fold((0i64, 0usize), |(sum, n), &b| {
            (sum + (b as i64 - 128).abs(), n + 1)
        }),
        SampleWidth::I16 => bytes
            .chunks_exact(2)
            .fold((0i64, 0usize), |(sum, n), c| {
                (sum + (i16::from_le_bytes([c[0], c[1]]) as i64).abs(), n + 1)
            }),
        SampleWidth::I32 => bytes
            .chunks_exact(4)
            .fold((0i64, 0usize), |(sum, n), c| {
                let v = i32::from_le_bytes([c[0], c[1], c[2], c[3]]) as i64;
                (sum + v.abs(), n + 1)
            }),
    };
    (count > 0).then(|| sum as f64 / count as f64)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
