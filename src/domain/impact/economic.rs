//! Fiscal and employment impact.

use serde::{Deserialize, Serialize};

use super::{AreaBaseline, ImpactCoefficients};
use crate::domain::planning::DraftPlan;

pub const AVERAGE_UNIT_VALUE: f64 = 800_000.0;
pub const EFFECTIVE_TAX_RATE: f64 = 0.012;
pub const CONSTRUCTION_JOBS_PER_UNIT: u32 = 2;
pub const COMMERCIAL_SF_PER_JOB: u32 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicImpact {
    pub property_value_change_percentage: f64,
    pub tax_revenue_increase: f64,
    pub construction_jobs_created: u32,
    pub permanent_jobs_created: u32,
    /// -1 to 1.
    pub local_business_impact_score: f64,
    pub cost_per_unit: f64,
    pub total_development_cost: f64,
}

impl EconomicImpact {
    pub fn assess(
        plan: &DraftPlan,
        coefficients: &ImpactCoefficients,
        baseline: &AreaBaseline,
    ) -> Self {
        let units = f64::from(plan.total_units);
        let permanent_jobs = plan.ground_floor_commercial_sf / COMMERCIAL_SF_PER_JOB;

        Self {
            property_value_change_percentage: units / 100.0 * baseline.property_multiplier,
            tax_revenue_increase: units * AVERAGE_UNIT_VALUE * EFFECTIVE_TAX_RATE,
            construction_jobs_created: plan.total_units.saturating_mul(CONSTRUCTION_JOBS_PER_UNIT),
            permanent_jobs_created: permanent_jobs,
            local_business_impact_score: if permanent_jobs > 5 { 0.3 } else { 0.1 },
            cost_per_unit: coefficients.cost_per_unit,
            total_development_cost: coefficients.cost_per_unit * units,
        }
    }
}
