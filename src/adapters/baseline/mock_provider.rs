//! Mock Baseline Provider for testing.
//!
//! Returns a fixed result after an optional delay and counts calls.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockBaselineProvider::live(4200).with_delay(Duration::from_millis(50));
//! let snapshot = provider.fetch("mission").await?;
//! assert_eq!(snapshot.existing_units, 4200);
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::impact::{BaselineSnapshot, BaselineSource};
use crate::ports::{BaselineError, BaselineProvider};

#[derive(Debug, Clone)]
pub struct MockBaselineProvider {
    result: Result<BaselineSnapshot, BaselineError>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl MockBaselineProvider {
    /// Answers every request with a live unit count.
    pub fn live(existing_units: u32) -> Self {
        Self::with_result(Ok(BaselineSnapshot {
            existing_units,
            source: BaselineSource::Live,
        }))
    }

    /// Fails every request with the given error.
    pub fn failing(error: BaselineError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<BaselineSnapshot, BaselineError>) -> Self {
        Self {
            result,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BaselineProvider for MockBaselineProvider {
    async fn fetch(&self, _area_key: &str) -> Result<BaselineSnapshot, BaselineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.result.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
