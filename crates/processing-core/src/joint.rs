//! Joint metric: sum of peak-normalized series.

use vidsonic_common::error::{VidsonicError, VidsonicResult};

/// Combine several series into one with the first series' length.
///
/// Each input is zero-padded (or truncated) to that length and divided by
/// its own maximum; the result is the element-wise sum of those ratios, not
/// their mean. An input whose peak is not positive cannot be normalized and
/// is rejected.
pub fn joint(series: &[&[f64]]) -> VidsonicResult<Vec<f64>> {
    let Some(first) = series.first() else {
        return Err(VidsonicError::degenerate("joint", "no series to combine"));
    };
    let len = first.len();
    let mut result = vec![0.0; len];

    for (position, input) in series.iter().enumerate() {
        let aligned = &input[..input.len().min(len)];
        let peak = aligned
            .iter()
            .copied()
            .fold(0.0_f64, f64::max);

        if !(peak > 0.0) {
            return Err(VidsonicError::degenerate(
                "joint",
                format!("series {position} has no positive peak to normalize by"),
            ));
        }

        for (acc, value) in result.iter_mut().zip(aligned) {
            *acc += value / peak;
        }
    }

    Ok(result)
}
