//! Housing supply and displacement impact.

use serde::{Deserialize, Serialize};

use super::{AreaBaseline, ImpactCoefficients};
use crate::domain::foundation::Fraction;
use crate::domain::planning::DraftPlan;

/// Residents assumed per new unit.
pub const PERSONS_PER_UNIT: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingImpact {
    pub current_units: u32,
    pub projected_units: u32,
    pub net_new_units: u32,
    pub affordable_units_added: u32,
    pub market_rate_units_added: u32,
    pub displacement_risk_score: Fraction,
    /// Affordable share of the new units, in percent.
    pub affordability_improvement: f64,
    pub population_capacity_change: u32,
}

impl HousingImpact {
    /// Impact with no units added.
    pub fn zeroed() -> Self {
        Self {
            current_units: 0,
            projected_units: 0,
            net_new_units: 0,
            affordable_units_added: 0,
            market_rate_units_added: 0,
            displacement_risk_score: Fraction::ZERO,
            affordability_improvement: 0.0,
            population_capacity_change: 0,
        }
    }

    pub fn assess(
        plan: &DraftPlan,
        coefficients: &ImpactCoefficients,
        baseline: &AreaBaseline,
    ) -> Self {
        let total = plan.total_units;
        let affordable = plan.affordable_units.min(total);

        let displacement =
            coefficients.base_displacement_risk * (1.0 - plan.affordable_pct * 0.5);

        let affordability_improvement = if total > 0 {
            f64::from(affordable) / f64::from(total) * 100.0
        } else {
            0.0
        };

        Self {
            current_units: baseline.existing_units,
            projected_units: baseline.existing_units.saturating_add(total),
            net_new_units: total,
            affordable_units_added: affordable,
            market_rate_units_added: total - affordable,
            displacement_risk_score: Fraction::new(displacement),
            affordability_improvement,
            population_capacity_change: total.saturating_mul(PERSONS_PER_UNIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::impact::ImpactCoefficientTable;
    use crate::domain::planning::Archetype;
    use crate::domain::test_support::draft_plan;

    #[test]
    fn unit_split_sums_to_net_new() {
        let plan = draft_plan(Archetype::Aggressive, 21, 7, 0.35);
        let impact = HousingImpact::assess(
            &plan,
            ImpactCoefficientTable::default().for_archetype(Archetype::Aggressive),
            &AreaBaseline::default(),
        );
        assert_eq!(
            impact.affordable_units_added + impact.market_rate_units_added,
            impact.net_new_units
        );
        assert_eq!(impact.projected_units, 1021);
        assert_eq!(impact.population_capacity_change, 42);
    }

    #[test]
    fn affordability_reduces_displacement_risk() {
        let table = ImpactCoefficientTable::default();
        let coefficients = table.for_archetype(Archetype::Aggressive);
        let none = HousingImpact::assess(
            &draft_plan(Archetype::Aggressive, 20, 0, 0.0),
            coefficients,
            &AreaBaseline::default(),
        );
        let some = HousingImpact::assess(
            &draft_plan(Archetype::Aggressive, 20, 7, 0.35),
            coefficients,
            &AreaBaseline::default(),
        );
        assert!((none.displacement_risk_score.value() - 0.4).abs() < 1e-9);
        assert!((some.displacement_risk_score.value() - 0.33).abs() < 1e-9);
    }

    #[test]
    fn affordability_improvement_is_percent_of_total() {
        let impact = HousingImpact::assess(
            &draft_plan(Archetype::Moderate, 20, 5, 0.25),
            ImpactCoefficientTable::default().for_archetype(Archetype::Moderate),
            &AreaBaseline::default(),
        );
        assert!((impact.affordability_improvement - 25.0).abs() < 1e-9);
    }

    #[test]
    fn zero_unit_plan_has_zero_improvement() {
        let impact = HousingImpact::assess(
            &draft_plan(Archetype::Conservative, 0, 0, 0.0),
            ImpactCoefficientTable::default().for_archetype(Archetype::Conservative),
            &AreaBaseline::default(),
        );
        assert_eq!(impact.affordability_improvement, 0.0);
        assert_eq!(impact.net_new_units, 0);
    }
}
