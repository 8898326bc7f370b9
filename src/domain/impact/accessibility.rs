//! Walkability, transit and traffic impact.

use serde::{Deserialize, Serialize};

use super::{AreaBaseline, ImpactCoefficients};
use crate::domain::foundation::Fraction;
use crate::domain::planning::DraftPlan;

/// Walk-score points contributed per 1000 sf of ground-floor commercial.
const COMMERCIAL_SF_PER_WALK_POINT: f64 = 1000.0;
const MAX_COMMERCIAL_WALK_POINTS: f64 = 5.0;
const MAX_TRAFFIC_IMPACT: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityImpact {
    pub walk_score_before: f64,
    pub walk_score_after: f64,
    pub walk_score_change: f64,
    pub transit_accessibility_before: f64,
    pub transit_accessibility_change: f64,
    pub bike_infrastructure_impact: f64,
    /// Parking spaces added by the plan.
    pub parking_impact: u32,
    /// Congestion pressure, higher is worse.
    pub traffic_impact_score: Fraction,
    /// Percent improvement in amenity access.
    pub amenity_access_improvement: f64,
}

/// Transit improvement justified by project size alone.
fn transit_step(total_units: u32) -> f64 {
    match total_units {
        u if u > 50 => 0.15,
        u if u > 20 => 0.08,
        u if u > 10 => 0.03,
        _ => 0.0,
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

impl AccessibilityImpact {
    pub fn assess(
        plan: &DraftPlan,
        coefficients: &ImpactCoefficients,
        baseline: &AreaBaseline,
    ) -> Self {
        let commercial_points = (f64::from(plan.ground_floor_commercial_sf)
            / COMMERCIAL_SF_PER_WALK_POINT)
            .min(MAX_COMMERCIAL_WALK_POINTS);
        let walk_change = round_to(
            (commercial_points + coefficients.walk_bonus) * baseline.walk_potential,
            1,
        );

        let transit_change = round_to(
            (transit_step(plan.total_units) + coefficients.transit_bonus)
                * baseline.transit_potential,
            3,
        );

        let base_traffic = (f64::from(plan.total_units) / 100.0).min(MAX_TRAFFIC_IMPACT);
        let traffic = (base_traffic * baseline.traffic_multiplier).min(MAX_TRAFFIC_IMPACT);

        Self {
            walk_score_before: baseline.walk_score,
            walk_score_after: (baseline.walk_score + walk_change).min(100.0),
            walk_score_change: walk_change,
            transit_accessibility_before: baseline.transit_baseline,
            transit_accessibility_change: transit_change,
            bike_infrastructure_impact: coefficients.bike_infrastructure,
            parking_impact: plan.parking_spaces,
            traffic_impact_score: Fraction::new(traffic),
            amenity_access_improvement: walk_change * 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::impact::{BaselineCatalog, ImpactCoefficientTable};
    use crate::domain::planning::Archetype;
    use crate::domain::test_support::draft_plan;

    fn assess(plan: &DraftPlan, area: &str) -> AccessibilityImpact {
        AccessibilityImpact::assess(
            plan,
            ImpactCoefficientTable::default().for_archetype(plan.archetype()),
            BaselineCatalog::standard().lookup(area),
        )
    }

    #[test]
    fn walk_change_scales_with_area_potential() {
        let mut plan = draft_plan(Archetype::Moderate, 10, 2, 0.2);
        plan.ground_floor_commercial_sf = 1000;
        // (1 + 1.0) * 1.5 in the Marina, * 0.8 in Hayes Valley
        assert_eq!(assess(&plan, "marina").walk_score_change, 3.0);
        assert_eq!(assess(&plan, "hayes_valley").walk_score_change, 1.6);
    }

    #[test]
    fn commercial_walk_points_are_capped() {
        let mut plan = draft_plan(Archetype::Conservative, 10, 1, 0.1);
        plan.ground_floor_commercial_sf = 9000;
        assert_eq!(assess(&plan, "mission").walk_score_change, 5.5);
    }

    #[test]
    fn transit_change_follows_unit_thresholds() {
        let cases = [(5, 0.0), (11, 0.03), (21, 0.08), (51, 0.15)];
        for (units, expected) in cases {
            let plan = draft_plan(Archetype::Moderate, units, 0, 0.0);
            assert_eq!(assess(&plan, "mission").transit_accessibility_change, expected);
        }
    }

    #[test]
    fn innovative_transit_bonus_applies() {
        let plan = draft_plan(Archetype::Innovative, 21, 8, 0.4);
        assert_eq!(assess(&plan, "mission").transit_accessibility_change, 0.18);
        assert_eq!(assess(&plan, "marina").transit_accessibility_change, 0.27);
    }

    #[test]
    fn traffic_is_capped() {
        let plan = draft_plan(Archetype::Aggressive, 300, 0, 0.0);
        assert_eq!(assess(&plan, "marina").traffic_impact_score.value(), 0.8);
        let small = draft_plan(Archetype::Aggressive, 20, 0, 0.0);
        assert!((assess(&small, "hayes_valley").traffic_impact_score.value() - 0.14).abs() < 1e-9);
    }

    #[test]
    fn amenity_access_doubles_walk_change() {
        let plan = draft_plan(Archetype::Innovative, 10, 4, 0.4);
        let impact = assess(&plan, "mission");
        assert_eq!(impact.amenity_access_improvement, impact.walk_score_change * 2.0);
        assert_eq!(impact.parking_impact, plan.parking_spaces);
    }
}
