//! Structured logging for the view pipeline, built on `tracing`.
//!
//! Vista is a library, so only the level, format, and color are
//! configurable here; sinks beyond stdout belong to the host.

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::ViewError;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Initialize the global subscriber from the configuration.
///
/// `RUST_LOG` overrides the configured level when set. Call once per
/// process; a second initialization reports a configuration error.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ViewError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            ViewError::Config(format!("invalid log level '{}': {}", config.level, e))
        })?;

    match config.format.as_str() {
        "json" => {
            let layer = fmt::layer().json().with_timer(ChronoUtc::rfc_3339());
            Registry::default()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(|e| ViewError::Config(e.to_string()))?;
        }
        _ => {
            let layer = fmt::layer()
                .with_ansi(config.color)
                .with_timer(ChronoUtc::rfc_3339());
            Registry::default()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(|e| ViewError::Config(e.to_string()))?;
        }
    }
    Ok(())
}
