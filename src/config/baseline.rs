//! Baseline data service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_TIMEOUT_SECS: u64 = 30;

/// Live baseline lookup. Without a base URL the static catalog is used.
#[derive(Debug, Clone, Deserialize)]
pub struct BaselineConfig {
    /// Planning data service root, e.g. `https://data.example.gov/api`
    pub api_base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token for the data service
    pub api_key: Option<Secret<String>>,
}

impl BaselineConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a live data service is configured
    pub fn is_live(&self) -> bool {
        self.api_base_url.as_ref().is_some_and(|u| !u.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }

        if let Some(url) = &self.api_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidBaseUrl);
            }
        }

        if let Some(key) = &self.api_key {
            if !self.is_live() {
                return Err(ValidationError::MissingRequired("BASELINE__API_BASE_URL"));
            }
            if key.expose_secret().trim().is_empty() {
                return Err(ValidationError::EmptyApiKey);
            }
        }

        Ok(())
    }
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

fn default_timeout() -> u64 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_config_defaults() {
        let config = BaselineConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert!(!config.is_live());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_live_config_validates() {
        let config = BaselineConfig {
            api_base_url: Some("https://data.example.gov/api".to_string()),
            api_key: Some(Secret::new("token".to_string())),
            ..Default::default()
        };
        assert!(config.is_live());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = BaselineConfig {
            api_base_url: Some("ftp://data.example.gov".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBaseUrl)));
    }

    #[test]
    fn test_rejects_zero_and_excessive_timeouts() {
        for timeout_secs in [0, 31] {
            let config = BaselineConfig {
                timeout_secs,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }
    }

    #[test]
    fn test_api_key_requires_url() {
        let config = BaselineConfig {
            api_key: Some(Secret::new("token".to_string())),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_rejects_blank_api_key() {
        let config = BaselineConfig {
            api_base_url: Some("http://localhost:9000".to_string()),
            api_key: Some(Secret::new("  ".to_string())),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::EmptyApiKey)));
    }
}
