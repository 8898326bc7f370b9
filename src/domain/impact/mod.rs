//! Impact Module - Multi-criteria evaluation of validated plans.
//!
//! # Components
//!
//! - `HousingImpact`, `AccessibilityImpact`, `EquityImpact`, `EconomicImpact`,
//!   `EnvironmentalImpact` - One record per category, computed independently
//! - `ImpactCoefficientTable` - Per-archetype multipliers
//! - `BaselineCatalog` - Per-area baseline constants
//! - `ImpactEvaluator` - Category assessment plus weighted synthesis
//!
//! Everything here is pure; baseline fetching happens outside the domain.

mod accessibility;
mod baseline;
mod coefficients;
mod comprehensive;
mod economic;
mod environmental;
mod equity;
mod evaluator;
mod housing;
mod thresholds;

pub use accessibility::AccessibilityImpact;
pub use baseline::{
    AreaBaseline, BaselineCatalog, BaselineSnapshot, BaselineSource, ResolvedBaseline,
};
pub use coefficients::{ImpactCoefficientTable, ImpactCoefficients};
pub use comprehensive::{format_dollars, ComprehensiveImpact, ImpactCategories};
pub use economic::EconomicImpact;
pub use environmental::EnvironmentalImpact;
pub use equity::EquityImpact;
pub use evaluator::ImpactEvaluator;
pub use housing::{HousingImpact, PERSONS_PER_UNIT};
pub use thresholds::{
    BenefitThresholds, ConcernThresholds, ConfidenceSettings, EquityThresholds,
    MitigationThresholds, ScoringThresholds, SynthesisWeights,
};
