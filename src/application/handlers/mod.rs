//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod scenario;

pub use scenario::{AnalyzeScenarioCommand, AnalyzeScenarioHandler, ScenarioAnalysis};
