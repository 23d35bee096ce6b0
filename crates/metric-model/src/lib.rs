//! Vidsonic Metric Model
//!
//! Defines the data contracts shared between extraction and its consumers:
//! - **Features:** The named per-frame metrics (brightness, contrast, ...)
//! - **Series:** Dense numeric sequences, one value per video frame
//! - **Events:** Timestamped `(feature, value)` records in JSONL form
//! - **Track settings:** Typed per-feature sonification choices
//!
//! A frame that could not be decoded is stored as the sentinel `-1`, so
//! series are never sparse.

pub mod event;
pub mod feature;
pub mod series;
pub mod settings;

pub use event::*;
pub use feature::*;
pub use series::*;
pub use settings::*;
