//! Draft and validated development plans.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Archetype, PlanVariant};
use crate::domain::foundation::{Fraction, PlanId};
use crate::domain::zoning::{
    ConstraintValidator, Proposal, ValidationOutcome, Violation, ViolationKind, ZoneType,
};

/// Zoning feasibility of a plan. Assigned once, during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    FullyCompliant,
    RequiresVariances,
    NeedsRezoning,
    NotFeasible,
}

impl Feasibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feasibility::FullyCompliant => "fully_compliant",
            Feasibility::RequiresVariances => "requires_variances",
            Feasibility::NeedsRezoning => "needs_rezoning",
            Feasibility::NotFeasible => "not_feasible",
        }
    }

    /// Lower-case words, e.g. "requires variances".
    pub fn label(&self) -> &'static str {
        match self {
            Feasibility::FullyCompliant => "fully compliant",
            Feasibility::RequiresVariances => "requires variances",
            Feasibility::NeedsRezoning => "needs rezoning",
            Feasibility::NotFeasible => "not feasible",
        }
    }
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_error_weight() -> f64 {
    0.25
}

fn default_warning_weight() -> f64 {
    0.05
}

fn default_minor_excess_ratio() -> f64 {
    1.10
}

/// Weights turning a violation list into a compliance score and feasibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceWeights {
    /// Score penalty per error violation.
    #[serde(default = "default_error_weight")]
    pub error_weight: f64,
    /// Score penalty per warning violation.
    #[serde(default = "default_warning_weight")]
    pub warning_weight: f64,
    /// Largest proposed/allowed ratio still treated as a variance.
    #[serde(default = "default_minor_excess_ratio")]
    pub minor_excess_ratio: f64,
}

impl Default for ComplianceWeights {
    fn default() -> Self {
        Self {
            error_weight: default_error_weight(),
            warning_weight: default_warning_weight(),
            minor_excess_ratio: default_minor_excess_ratio(),
        }
    }
}

impl ComplianceWeights {
    /// `1 - (errors * error_weight + warnings * warning_weight)`, clamped to [0, 1].
    pub fn score(&self, outcome: &ValidationOutcome) -> Fraction {
        let errors = outcome.errors().count() as f64;
        let warnings = outcome.warnings().count() as f64;
        Fraction::new(1.0 - (errors * self.error_weight + warnings * self.warning_weight))
    }
}

/// A generated plan before zoning validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPlan {
    pub plan_id: PlanId,
    pub variant: PlanVariant,
    pub name: String,
    pub description: String,
    pub zone: ZoneType,
    pub far: f64,
    pub height_ft: u32,
    pub total_units: u32,
    pub lot_area_sf: f64,
    pub affordable_units: u32,
    /// Affordable share as a fraction of total units.
    pub affordable_pct: f64,
    pub parking_spaces: u32,
    pub ground_floor_commercial_sf: u32,
    pub required_variances: Vec<String>,
    pub design_rationale: Vec<String>,
    pub policy_alignment: Vec<String>,
}

impl DraftPlan {
    pub fn archetype(&self) -> Archetype {
        self.variant.archetype()
    }

    pub fn market_rate_units(&self) -> u32 {
        self.total_units.saturating_sub(self.affordable_units)
    }

    /// The zoning proposal this plan submits.
    pub fn proposal(&self) -> Proposal {
        Proposal {
            zone: self.zone,
            far: self.far,
            height_ft: self.height_ft,
            lot_area_sf: self.lot_area_sf,
            num_units: self.total_units,
            ground_floor_commercial_sf: self.ground_floor_commercial_sf,
        }
    }

    /// Validates the plan, producing a new [`ValidatedPlan`].
    pub fn validate(
        self,
        validator: &ConstraintValidator<'_>,
        weights: &ComplianceWeights,
    ) -> ValidatedPlan {
        let outcome = validator.validate_proposal(&self.proposal());
        let (feasibility, suggested_zone) = assess_feasibility(&self, &outcome, validator, weights);
        let compliance_score = weights.score(&outcome);
        let zoning_compliance = describe_compliance(&outcome.violations);

        ValidatedPlan {
            plan: self,
            feasibility,
            is_valid: outcome.is_valid,
            violations: outcome.violations,
            compliance_score,
            zoning_compliance,
            suggested_zone,
        }
    }
}

fn assess_feasibility(
    plan: &DraftPlan,
    outcome: &ValidationOutcome,
    validator: &ConstraintValidator<'_>,
    weights: &ComplianceWeights,
) -> (Feasibility, Option<ZoneType>) {
    if outcome.violations.is_empty() {
        return (Feasibility::FullyCompliant, None);
    }
    if outcome.is_valid {
        return (Feasibility::RequiresVariances, None);
    }
    if outcome.find(ViolationKind::UnknownZone).is_some() {
        return (Feasibility::NotFeasible, None);
    }

    let minor = outcome
        .errors()
        .all(|v| v.rule.is_dimensional() && v.excess_ratio() <= weights.minor_excess_ratio);
    if minor {
        return (Feasibility::RequiresVariances, None);
    }

    match validator.first_zone_admitting(plan.zone, plan.far, plan.height_ft) {
        Some(zone) => (Feasibility::NeedsRezoning, Some(zone)),
        None => (Feasibility::NotFeasible, None),
    }
}

fn describe_compliance(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return "Fully compliant with zoning requirements".to_string();
    }
    let mut summary = violations
        .iter()
        .take(2)
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if violations.len() > 2 {
        summary.push_str(&format!(" +{} more", violations.len() - 2));
    }
    format!("Violations: {}", summary)
}

/// A plan together with its zoning assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedPlan {
    #[serde(flatten)]
    pub plan: DraftPlan,
    pub feasibility: Feasibility,
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    pub compliance_score: Fraction,
    pub zoning_compliance: String,
    /// Lowest zone admitting the plan, when rezoning is needed.
    pub suggested_zone: Option<ZoneType>,
}

impl ValidatedPlan {
    pub fn plan_id(&self) -> &PlanId {
        &self.plan.plan_id
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(Violation::is_error)
    }
}
