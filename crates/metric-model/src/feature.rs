//! Names of the metrics produced by the extraction pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A per-frame metric the pipeline knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Sum of all channel intensities in a frame.
    Brightness,
    /// Sum of absolute per-channel differences from the previous frame.
    Contrast,
    /// Change in quantized colour occupancy from the previous frame.
    Histogram,
    /// Mean absolute audio sample value over one frame's worth of audio.
    Amplitude,
    /// Sum of the peak-normalized brightness, histogram and contrast series.
    Joint,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Amplitude,
        Feature::Brightness,
        Feature::Contrast,
        Feature::Histogram,
        Feature::Joint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Brightness => "brightness",
            Feature::Contrast => "contrast",
            Feature::Histogram => "histogram",
            Feature::Amplitude => "amplitude",
            Feature::Joint => "joint",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature '{0}' (expected one of amplitude, brightness, contrast, histogram, joint)")]
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_names() {
        for feature in Feature::ALL {
            assert_eq!(feature.as_str().parse::<Feature>().unwrap(), feature);
        }
        assert_eq!(" Joint ".parse::<Feature>().unwrap(), Feature::Joint);
        assert!("saturation".parse::<Feature>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Feature::Histogram).unwrap();
        assert_eq!(json, "\"histogram\"");
    }
}
