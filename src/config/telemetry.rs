//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::error::{ConfigError, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directives, e.g. `info,civic_planner=debug`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl TelemetryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.log_filter)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }

    /// Install the global tracing subscriber. Logs go to stderr so stdout
    /// carries only the analysis output.
    pub fn init(&self) -> Result<(), ConfigError> {
        let filter = EnvFilter::try_new(&self.log_filter)
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))?;
        let registry = tracing_subscriber::registry().with(filter);

        let result = if self.json {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
        };

        result.map_err(|e| ConfigError::TelemetryInit(e.to_string()))
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "info,civic_planner=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_defaults() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_filter, "info,civic_planner=debug");
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_filter() {
        let config = TelemetryConfig {
            log_filter: "civic_planner=verbose".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogFilter(_))
        ));
    }
}
