//! Baseline Provider Adapters.
//!
//! Implementations of the BaselineProvider port.
//!
//! ## Available Adapters
//!
//! - `StaticBaselineProvider` - Built-in per-area constants
//! - `HttpBaselineProvider` - Live unit counts from a planning data service
//! - `FallbackBaselineProvider` - Timeout-bounded primary with static fallback
//! - `MockBaselineProvider` - Configurable mock for testing

mod fallback_provider;
mod http_provider;
mod mock_provider;
mod static_provider;

pub use fallback_provider::FallbackBaselineProvider;
pub use http_provider::{HttpBaselineConfig, HttpBaselineProvider};
pub use mock_provider::MockBaselineProvider;
pub use static_provider::StaticBaselineProvider;
