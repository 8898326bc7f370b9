//! Fallback Baseline Provider - Bounds a live provider and degrades to static values.
//!
//! Every failure of the primary provider, including exceeding the timeout,
//! is logged at `warn` and answered from the static catalog. Callers never see
//! a `BaselineError` from this provider.
//!
//! # Example
//!
//! ```ignore
//! let primary = HttpBaselineProvider::new(http_config)?;
//! let provider = FallbackBaselineProvider::new(Arc::new(primary), StaticBaselineProvider::default())
//!     .with_timeout(Duration::from_secs(2));
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use super::StaticBaselineProvider;
use crate::domain::impact::BaselineSnapshot;
use crate::ports::{BaselineError, BaselineProvider};

pub struct FallbackBaselineProvider {
    primary: Arc<dyn BaselineProvider>,
    fallback: StaticBaselineProvider,
    timeout: Duration,
}

impl FallbackBaselineProvider {
    pub fn new(primary: Arc<dyn BaselineProvider>, fallback: StaticBaselineProvider) -> Self {
        Self {
            primary,
            fallback,
            timeout: Duration::from_secs(2),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch_primary(&self, area_key: &str) -> Result<BaselineSnapshot, BaselineError> {
        match timeout(self.timeout, self.primary.fetch(area_key)).await {
            Ok(result) => result,
            Err(_) => Err(BaselineError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

#[async_trait]
impl BaselineProvider for FallbackBaselineProvider {
    async fn fetch(&self, area_key: &str) -> Result<BaselineSnapshot, BaselineError> {
        match self.fetch_primary(area_key).await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                tracing::warn!(
                    area = area_key,
                    provider = self.primary.name(),
                    error = %err,
                    "Baseline lookup failed, using static values"
                );
                Ok(self.fallback.snapshot(area_key))
            }
        }
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}
