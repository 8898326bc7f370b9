//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Cannot read scoring overrides {path}: {source}")]
    ScoringFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scoring overrides {path}: {source}")]
    ScoringFileInvalid {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Tracing initialization failed: {0}")]
    TelemetryInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid baseline API URL format")]
    InvalidBaseUrl,

    #[error("Baseline timeout must be between 1 and 30 seconds")]
    InvalidTimeout,

    #[error("Baseline API key is empty")]
    EmptyApiKey,

    #[error("Scoring overrides file not found: {0}")]
    ScoringFileNotFound(PathBuf),

    #[error("Invalid scoring value: {0}")]
    InvalidScoringValue(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
