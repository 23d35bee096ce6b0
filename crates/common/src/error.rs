//! Error types shared across Vidsonic crates.

use std::path::PathBuf;

/// Top-level error type for Vidsonic operations.
///
/// Single-frame decode failures are not represented here: extractors
/// recover from them locally by emitting the `-1` sentinel.
#[derive(Debug, thiserror::Error)]
pub enum VidsonicError {
    #[error("Cannot open source {path}: {message}")]
    SourceOpen { path: PathBuf, message: String },

    #[error("Degenerate input to {operation}: {message}")]
    DegenerateInput {
        operation: &'static str,
        message: String,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using VidsonicError.
pub type VidsonicResult<T> = Result<T, VidsonicError>;

impl VidsonicError {
    pub fn source_open(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::SourceOpen {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn degenerate(operation: &'static str, msg: impl Into<String>) -> Self {
        Self::DegenerateInput {
            operation,
            message: msg.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether this error means the caller fed an empty or all-zero sequence.
    pub fn is_degenerate_input(&self) -> bool {
        matches!(self, Self::DegenerateInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_message_names_operation() {
        let err = VidsonicError::degenerate("change_points", "empty sequence");
        assert!(err.is_degenerate_input());
        assert_eq!(
            err.to_string(),
            "Degenerate input to change_points: empty sequence"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: VidsonicError = io.into();
        assert!(matches!(err, VidsonicError::Io(_)));
        assert!(!err.is_degenerate_input());
    }
}
