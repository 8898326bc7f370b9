//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `BaselineProvider` - Live area baseline lookups

mod baseline_provider;

pub use baseline_provider::{BaselineError, BaselineProvider};
