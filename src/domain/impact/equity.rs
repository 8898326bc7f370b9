//! Gentrification and community impact.

use serde::{Deserialize, Serialize};

use super::{AreaBaseline, EquityThresholds, ImpactCoefficients};
use crate::domain::foundation::Fraction;
use crate::domain::planning::DraftPlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityImpact {
    pub gentrification_pressure_before: f64,
    /// Signed change in pressure, roughly -1 to 1.
    pub gentrification_pressure_change: f64,
    pub demographic_stability_score: Fraction,
    pub cultural_preservation_impact: f64,
    pub economic_opportunity_change: f64,
    pub community_benefit_score: Fraction,
}

impl EquityImpact {
    /// Neutral impact: no pressure change, mid-range stability and benefit.
    pub fn neutral() -> Self {
        Self {
            gentrification_pressure_before: 0.0,
            gentrification_pressure_change: 0.0,
            demographic_stability_score: Fraction::new(0.5),
            cultural_preservation_impact: 0.0,
            economic_opportunity_change: 0.0,
            community_benefit_score: Fraction::new(0.5),
        }
    }

    pub fn assess(
        plan: &DraftPlan,
        coefficients: &ImpactCoefficients,
        baseline: &AreaBaseline,
        thresholds: &EquityThresholds,
    ) -> Self {
        let mut pressure_change =
            (coefficients.gentrification_multiplier - 1.0) * baseline.gentrification_pressure;
        if plan.affordable_pct > thresholds.pressure_relief_affordability {
            pressure_change -= thresholds.pressure_relief;
        }

        let mut benefit = thresholds.base_community_benefit + coefficients.community_benefit_bonus;
        if plan.affordable_pct > thresholds.benefit_bonus_affordability {
            benefit += thresholds.affordability_benefit_bonus;
        }

        let magnitude = pressure_change.abs();
        Self {
            gentrification_pressure_before: baseline.gentrification_pressure,
            gentrification_pressure_change: pressure_change,
            demographic_stability_score: Fraction::new((0.9 - magnitude * 0.8).max(0.3)),
            cultural_preservation_impact: -magnitude * 0.5,
            economic_opportunity_change: f64::from(plan.total_units) / 100.0,
            community_benefit_score: Fraction::new(benefit.min(1.0)),
        }
    }
}
