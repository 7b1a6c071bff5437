//! Error types for view discovery and policy application.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a view facility during discovery
#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("template root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("missing discovery context: {0}")]
    MissingContext(String),

    #[error("discovery I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the registry when building the view bag
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("facility '{facility}' failed during discovery: {source}")]
    Facility {
        facility: String,
        #[source]
        source: FacilityError,
    },

    #[error("policy '{policy}' failed: {message}")]
    Policy { policy: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for ViewError {
    fn from(err: config::ConfigError) -> Self {
        ViewError::Config(err.to_string())
    }
}
