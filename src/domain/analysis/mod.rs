//! Analysis Module - Cross-plan comparison and recommendation.
//!
//! `ComparativeAnalyzer` ranks evaluated plans, picks a recommendation and
//! derives tradeoff and implementation guidance. All functions are pure and
//! stateless; they take impact records as input and return computed results.

mod comparative_analyzer;

pub use comparative_analyzer::{
    ComparativeAnalyzer, ComparisonThresholds, RankingWeights, ScenarioComparison,
};
