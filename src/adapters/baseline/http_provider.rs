//! HTTP Baseline Provider - Fetches live unit counts from a planning data service.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpBaselineConfig::new("https://planning.example.org/api/v1")
//!     .with_timeout(Duration::from_secs(2))
//!     .with_api_key(api_key);
//!
//! let provider = HttpBaselineProvider::new(config)?;
//! ```
//!
//! The service answers `GET {base_url}/neighborhoods/{area_key}/unit-estimates`
//! with a JSON body carrying `existing_units`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::impact::{BaselineSnapshot, BaselineSource};
use crate::ports::{BaselineError, BaselineProvider};

/// Configuration for the HTTP baseline provider.
#[derive(Debug, Clone)]
pub struct HttpBaselineConfig {
    /// Base URL of the planning data service, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Optional bearer token.
    api_key: Option<Secret<String>>,
}

impl HttpBaselineConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(2),
            api_key: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

#[derive(Debug, Deserialize)]
struct UnitEstimateResponse {
    existing_units: u32,
}

/// Baseline provider backed by an HTTP service.
pub struct HttpBaselineProvider {
    config: HttpBaselineConfig,
    client: Client,
}

impl HttpBaselineProvider {
    pub fn new(config: HttpBaselineConfig) -> Result<Self, BaselineError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BaselineError::unavailable(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { config, client })
    }

    fn unit_estimates_url(&self, area_key: &str) -> String {
        format!(
            "{}/neighborhoods/{}/unit-estimates",
            self.config.base_url, area_key
        )
    }

    async fn send_request(&self, area_key: &str) -> Result<Response, BaselineError> {
        let mut request = self.client.get(self.unit_estimates_url(area_key));
        if let Some(key) = self.config.api_key() {
            request = request.bearer_auth(key);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                BaselineError::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else if e.is_connect() {
                BaselineError::unavailable(format!("Connection failed: {}", e))
            } else {
                BaselineError::unavailable(e.to_string())
            }
        })
    }

    async fn handle_response_status(response: Response) -> Result<Response, BaselineError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BaselineError::unavailable(format!(
            "Unexpected status {}: {}",
            status, body
        )))
    }
}

#[async_trait]
impl BaselineProvider for HttpBaselineProvider {
    async fn fetch(&self, area_key: &str) -> Result<BaselineSnapshot, BaselineError> {
        tracing::debug!(area = area_key, url = %self.unit_estimates_url(area_key), "Fetching baseline");

        let response = self.send_request(area_key).await?;
        let response = Self::handle_response_status(response).await?;
        let body: UnitEstimateResponse = response
            .json()
            .await
            .map_err(|e| BaselineError::malformed(format!("Failed to parse response: {}", e)))?;

        Ok(BaselineSnapshot {
            existing_units: body.existing_units,
            source: BaselineSource::Live,
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}
