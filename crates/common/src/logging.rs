//! Logging and tracing initialization.
//!
//! Extraction progress goes to stderr so event output on stdout stays clean.

use crate::config::LoggingConfig;

/// Filter directives for a configured level.
///
/// A bare level scopes to the vidsonic crates and keeps dependencies at
/// `warn`. Anything with directive syntax is passed through unchanged.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return "warn,vidsonic=info".to_string();
    }
    if level.contains(',') || level.contains('=') {
        return level.to_string();
    }
    format!("warn,vidsonic={level}")
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish()).ok();
    } else {
        tracing::subscriber::set_global_default(builder.compact().finish()).ok();
    }
}
