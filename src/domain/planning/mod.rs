//! Planning Module - Scenario generation from planning briefs.
//!
//! # Components
//!
//! - `PlanningBrief` - Structured input: area, intent, targets, context
//! - `PlanVariant` - Archetype recipes with declarative generation coefficients
//! - `DraftPlan` / `ValidatedPlan` - A plan before and after zoning validation
//! - `ScenarioGenerator` - Drafts, validates and summarizes candidate plans
//! - `PlanOptimizer` - Scores plans against the brief and orders them
//!
//! Validation consumes a draft and returns a new value; nothing is
//! mutated after generation.

mod archetype;
mod brief;
mod generator;
mod optimizer;
mod plan;
mod templates;

pub use archetype::{
    AffordabilityRule, Archetype, CommercialRule, FarRule, GenerationCoefficients, HeightRule,
    InnovativeFocus, ParkingRule, PlanVariant, UnitRule,
};
pub use brief::{AreaProfile, PlanningBrief, PlanningIntent, TargetMetrics, TransitAccess};
pub use generator::{
    feasibility_summary, generation_confidence, PlanningAlternatives, ScenarioGenerator,
    STANDARD_LOT_AREA_SF,
};
pub use optimizer::{PlanOptimizer, PlanScore, PlanScoringWeights};
pub use plan::{ComplianceWeights, DraftPlan, Feasibility, ValidatedPlan};
pub use templates::{narrative_for, NarrativeInputs, PlanNarrative};
