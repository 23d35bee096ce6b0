//! Labelled numeric sequences and change-point index sets.

use serde::{Deserialize, Serialize};

use crate::feature::Feature;

/// Value stored at a frame position whose frame (or audio chunk) failed to decode.
pub const SENTINEL: f64 = -1.0;

/// A named sequence of per-frame values. Index = frame index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Feature label written into every event of this series.
    pub feature: String,
    pub values: Vec<f64>,
}

impl MetricSeries {
    pub fn new(feature: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            feature: feature.into(),
            values,
        }
    }

    pub fn of(feature: Feature, values: Vec<f64>) -> Self {
        Self::new(feature.as_str(), values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Positions holding the decode-failure sentinel.
    pub fn sentinel_positions(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == SENTINEL)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Strictly ascending indices into a series, always bounded by `0` and `len - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangePointSet(Vec<usize>);

impl ChangePointSet {
    /// Wrap indices produced by the detector. Callers must keep them ascending.
    pub fn from_sorted(indices: Vec<usize>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Consecutive `(start, end)` spans between change points.
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_positions() {
        let series = MetricSeries::of(Feature::Brightness, vec![10.0, -1.0, 3.0, -1.0]);
        assert_eq!(series.feature, "brightness");
        assert_eq!(series.sentinel_positions(), vec![1, 3]);
    }

    #[test]
    fn test_change_point_segments() {
        let cps = ChangePointSet::from_sorted(vec![0, 31, 59]);
        assert_eq!(cps.first(), Some(0));
        assert_eq!(cps.last(), Some(59));
        let segments: Vec<_> = cps.segments().collect();
        assert_eq!(segments, vec![(0, 31), (31, 59)]);
    }

    #[test]
    fn test_change_points_serialize_as_plain_list() {
        let cps = ChangePointSet::from_sorted(vec![0, 5]);
        assert_eq!(serde_json::to_string(&cps).unwrap(), "[0,5]");
    }
}
