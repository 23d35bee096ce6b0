//! Vidsonic Common Utilities
//!
//! Shared infrastructure for all Vidsonic crates:
//! - Error types and result aliases
//! - Timestamp axis for event streams
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
