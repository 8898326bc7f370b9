//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `CIVIC_PLANNER` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use civic_planner::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Live baseline: {}", config.baseline.is_live());
//! ```

mod baseline;
mod error;
mod scoring;
mod telemetry;

pub use baseline::BaselineConfig;
pub use error::{ConfigError, ValidationError};
pub use scoring::ScoringConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// static-baseline setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Live baseline lookup (data service URL, timeout, API key)
    #[serde(default)]
    pub baseline: BaselineConfig,

    /// Scoring overrides file
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Log filter and output format
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CIVIC_PLANNER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CIVIC_PLANNER__BASELINE__API_BASE_URL=...` -> `baseline.api_base_url = ...`
    /// - `CIVIC_PLANNER__TELEMETRY__JSON=true` -> `telemetry.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CIVIC_PLANNER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.baseline.validate()?;
        self.scoring.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("CIVIC_PLANNER__BASELINE__API_BASE_URL");
        env::remove_var("CIVIC_PLANNER__BASELINE__TIMEOUT_SECS");
        env::remove_var("CIVIC_PLANNER__BASELINE__API_KEY");
        env::remove_var("CIVIC_PLANNER__TELEMETRY__JSON");
        env::remove_var("CIVIC_PLANNER__TELEMETRY__LOG_FILTER");
        env::remove_var("CIVIC_PLANNER__SCORING__OVERRIDES_PATH");
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(!config.baseline.is_live());
        assert_eq!(config.baseline.timeout(), Duration::from_secs(2));
        assert!(config.scoring.overrides_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CIVIC_PLANNER__BASELINE__API_BASE_URL", "https://data.example.gov/api");
        env::set_var("CIVIC_PLANNER__BASELINE__TIMEOUT_SECS", "5");
        env::set_var("CIVIC_PLANNER__BASELINE__API_KEY", "token-xyz");
        env::set_var("CIVIC_PLANNER__TELEMETRY__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.baseline.api_base_url.as_deref(),
            Some("https://data.example.gov/api")
        );
        assert_eq!(config.baseline.timeout_secs, 5);
        assert!(config.baseline.api_key.is_some());
        assert!(config.telemetry.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_catches_bad_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CIVIC_PLANNER__BASELINE__API_BASE_URL", "data.example.gov");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBaseUrl)
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
