//! Static Baseline Provider - Serves unit counts from the built-in catalog.

use async_trait::async_trait;

use crate::domain::impact::{BaselineCatalog, BaselineSnapshot};
use crate::ports::{BaselineError, BaselineProvider};

/// Provider that never fails: answers from per-area constants.
#[derive(Debug, Clone)]
pub struct StaticBaselineProvider {
    catalog: BaselineCatalog,
}

impl StaticBaselineProvider {
    pub fn new(catalog: BaselineCatalog) -> Self {
        Self { catalog }
    }

    /// Snapshot without going through the async port.
    pub fn snapshot(&self, area_key: &str) -> BaselineSnapshot {
        self.catalog.static_snapshot(area_key)
    }
}

impl Default for StaticBaselineProvider {
    fn default() -> Self {
        Self::new(BaselineCatalog::standard())
    }
}

#[async_trait]
impl BaselineProvider for StaticBaselineProvider {
    async fn fetch(&self, area_key: &str) -> Result<BaselineSnapshot, BaselineError> {
        Ok(self.snapshot(area_key))
    }

    fn name(&self) -> &str {
        "static"
    }
}
