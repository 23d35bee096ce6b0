//! Vidsonic Processing Core
//!
//! Turns decoded video and audio into per-frame metric series:
//! - **Extractors:** brightness, contrast, histogram, amplitude
//! - **Joint:** sum of peak-normalized series
//! - **Change points:** spike markers for downstream randomization
//! - **Serialization:** timestamped JSONL events on a shared axis
//!
//! Frame and sample read failures degrade to the `-1` sentinel; failing to
//! open a source, or handing an algorithm an empty or all-zero series, is
//! an error.

pub mod amplitude;
pub mod brightness;
pub mod change_points;
pub mod contrast;
pub mod histogram;
pub mod joint;
pub mod pipeline;
pub mod serialize;

pub use amplitude::amplitude;
pub use brightness::brightness;
pub use change_points::{change_points, detect_change_points};
pub use contrast::contrast;
pub use histogram::histogram;
pub use joint::joint;
pub use pipeline::{ExtractionPipeline, MetricReport, VideoInfo};
pub use serialize::{label_series, to_events, write_events, EventWriter};
