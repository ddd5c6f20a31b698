//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration (`[logging]` table).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl LoggingConfig {
    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the configured level; `verbose`
    /// raises the configured level to `debug`.
    pub fn init(&self, verbose: bool) {
        let level = if verbose { "debug" } else { self.level.as_str() };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        // A subscriber may already be installed when embedded in tests.
        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .try_init(),
            _ => fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .try_init(),
        };
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}
