//! Green space, stormwater and carbon impact.

use serde::{Deserialize, Serialize};

use super::{AreaBaseline, ImpactCoefficients};
use crate::domain::foundation::Fraction;
use crate::domain::planning::DraftPlan;

/// Share of the lot assumed lost as green space.
const GREEN_SPACE_LOSS_SHARE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    pub green_space_change_sf: f64,
    pub flood_risk_before: f64,
    pub stormwater_impact_score: Fraction,
    /// Tons of CO2 per year.
    pub carbon_footprint_change: f64,
    pub energy_efficiency_rating: Fraction,
    pub climate_resilience_score: Fraction,
}

impl EnvironmentalImpact {
    pub fn assess(
        plan: &DraftPlan,
        coefficients: &ImpactCoefficients,
        baseline: &AreaBaseline,
    ) -> Self {
        let stormwater = baseline.flood_risk + (plan.far - 1.0) * 0.2;
        let carbon_per_unit = (5.0 - plan.far).max(2.0);

        Self {
            green_space_change_sf: -(plan.lot_area_sf * GREEN_SPACE_LOSS_SHARE),
            flood_risk_before: baseline.flood_risk,
            stormwater_impact_score: Fraction::new(stormwater),
            carbon_footprint_change: f64::from(plan.total_units) * carbon_per_unit,
            energy_efficiency_rating: Fraction::new(coefficients.energy_efficiency),
            climate_resilience_score: Fraction::new(coefficients.climate_resilience),
        }
    }
}
