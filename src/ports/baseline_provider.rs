//! Baseline Provider Port - Interface for fetching live area baselines.
//!
//! The only external data the pipeline consumes is the current housing-unit
//! count of an area. Providers return it as a [`BaselineSnapshot`]; every
//! other baseline value is a static per-area constant.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedProvider;
//!
//! #[async_trait]
//! impl BaselineProvider for FixedProvider {
//!     async fn fetch(&self, area_key: &str) -> Result<BaselineSnapshot, BaselineError> {
//!         Ok(BaselineSnapshot { existing_units: 4200, source: BaselineSource::Live })
//!     }
//!
//!     fn name(&self) -> &str {
//!         "fixed"
//!     }
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::impact::BaselineSnapshot;

/// Port for baseline lookups.
#[async_trait]
pub trait BaselineProvider: Send + Sync {
    /// Fetches the baseline snapshot for a normalized area key.
    async fn fetch(&self, area_key: &str) -> Result<BaselineSnapshot, BaselineError>;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}

/// Why a baseline could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaselineError {
    /// The service could not be reached or refused the request.
    #[error("baseline service unavailable: {0}")]
    Unavailable(String),

    /// No answer within the configured timeout.
    #[error("baseline lookup timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The service answered with something that is not a baseline.
    #[error("malformed baseline response: {0}")]
    Malformed(String),
}

impl BaselineError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_reason() {
        assert_eq!(
            BaselineError::unavailable("connection refused").to_string(),
            "baseline service unavailable: connection refused"
        );
        assert_eq!(
            BaselineError::Timeout { timeout_ms: 1500 }.to_string(),
            "baseline lookup timed out after 1500ms"
        );
        assert_eq!(
            BaselineError::malformed("missing existing_units").to_string(),
            "malformed baseline response: missing existing_units"
        );
    }
}
