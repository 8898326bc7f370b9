//! Plan archetypes and their generation coefficients.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{PlanningIntent, TransitAccess};

/// Development-intensity profile of a candidate plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Conservative,
    Moderate,
    Aggressive,
    Innovative,
}

impl Archetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Conservative => "conservative",
            Archetype::Moderate => "moderate",
            Archetype::Aggressive => "aggressive",
            Archetype::Innovative => "innovative",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme of an innovative plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnovativeFocus {
    Displacement,
    Climate,
    Walkability,
}

impl InnovativeFocus {
    /// The focus matching an intent, if that intent earns an innovative plan.
    pub fn for_intent(intent: PlanningIntent) -> Option<Self> {
        match intent {
            PlanningIntent::AntiDisplacement => Some(InnovativeFocus::Displacement),
            PlanningIntent::ClimateResilience => Some(InnovativeFocus::Climate),
            PlanningIntent::WalkabilityImprovement => Some(InnovativeFocus::Walkability),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InnovativeFocus::Displacement => "displacement",
            InnovativeFocus::Climate => "climate",
            InnovativeFocus::Walkability => "walkability",
        }
    }
}

/// A concrete plan recipe: an archetype, plus a focus for innovative plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanVariant {
    Conservative,
    Moderate,
    Aggressive,
    Innovative(InnovativeFocus),
}

impl PlanVariant {
    /// Variants generated for an intent, in generation order.
    pub fn for_intent(intent: PlanningIntent) -> Vec<PlanVariant> {
        let mut variants = vec![
            PlanVariant::Conservative,
            PlanVariant::Moderate,
            PlanVariant::Aggressive,
        ];
        if let Some(focus) = InnovativeFocus::for_intent(intent) {
            variants.push(PlanVariant::Innovative(focus));
        }
        variants
    }

    pub fn archetype(&self) -> Archetype {
        match self {
            PlanVariant::Conservative => Archetype::Conservative,
            PlanVariant::Moderate => Archetype::Moderate,
            PlanVariant::Aggressive => Archetype::Aggressive,
            PlanVariant::Innovative(_) => Archetype::Innovative,
        }
    }

    /// Slug used in plan ids, e.g. `innovative_climate`.
    pub fn slug(&self) -> String {
        match self {
            PlanVariant::Innovative(focus) => format!("innovative_{}", focus.as_str()),
            other => other.archetype().as_str().to_string(),
        }
    }

    /// Generation coefficients for this variant.
    pub fn coefficients(&self) -> GenerationCoefficients {
        match self {
            PlanVariant::Conservative => GenerationCoefficients {
                far: FarRule::Scaled { factor: 0.7, cap: Some(2.0) },
                height: HeightRule::ScaledWithMargin { factor: 0.8, margin_ft: 5 },
                units: UnitRule::AtLeastTarget { sf_per_unit: 800.0, fallback_target: 10 },
                affordability: AffordabilityRule::ZoneRequirementRealized,
                parking: ParkingRule::ScaledMinimum { factor: 0.8, floor: 0.5 },
                commercial: CommercialRule::CommercialZonesOnly(500),
            },
            PlanVariant::Moderate => GenerationCoefficients {
                far: FarRule::Scaled { factor: 0.9, cap: None },
                height: HeightRule::Scaled { factor: 0.95, bonus_ft: 0 },
                units: UnitRule::TargetCapped { sf_per_unit: 700.0, cap_sf_per_unit: 600.0 },
                affordability: AffordabilityRule::IntentBoosted { boost: 1.2, cap: 0.30 },
                parking: ParkingRule::TransitReduced { excellent: 0.7, otherwise: 0.9 },
                commercial: CommercialRule::CommercialZonesOnly(1000),
            },
            PlanVariant::Aggressive => GenerationCoefficients {
                far: FarRule::Scaled { factor: 1.0, cap: None },
                height: HeightRule::Scaled { factor: 1.0, bonus_ft: 0 },
                units: UnitRule::Density { sf_per_unit: 550.0 },
                affordability: AffordabilityRule::Scaled { factor: 1.5, cap: 0.35 },
                parking: ParkingRule::ScaledMinimum { factor: 0.5, floor: 0.25 },
                commercial: CommercialRule::CommercialZonesOnly(1500),
            },
            PlanVariant::Innovative(InnovativeFocus::Displacement) => GenerationCoefficients {
                far: FarRule::Scaled { factor: 0.85, cap: None },
                height: HeightRule::Scaled { factor: 0.9, bonus_ft: 0 },
                units: UnitRule::Density { sf_per_unit: 650.0 },
                affordability: AffordabilityRule::Fixed(0.40),
                parking: ParkingRule::Fixed(0.6),
                commercial: CommercialRule::AnyZone(800),
            },
            PlanVariant::Innovative(InnovativeFocus::Climate) => GenerationCoefficients {
                far: FarRule::Scaled { factor: 0.85, cap: None },
                height: HeightRule::Scaled { factor: 0.9, bonus_ft: 5 },
                units: UnitRule::Density { sf_per_unit: 700.0 },
                affordability: AffordabilityRule::ZoneRequirement,
                parking: ParkingRule::Fixed(0.4),
                commercial: CommercialRule::AnyZone(0),
            },
            PlanVariant::Innovative(InnovativeFocus::Walkability) => GenerationCoefficients {
                far: FarRule::Scaled { factor: 0.85, cap: None },
                height: HeightRule::Scaled { factor: 0.9, bonus_ft: 0 },
                units: UnitRule::Density { sf_per_unit: 750.0 },
                affordability: AffordabilityRule::ZoneRequirement,
                parking: ParkingRule::Fixed(0.3),
                commercial: CommercialRule::AnyZone(2000),
            },
        }
    }
}

impl fmt::Display for PlanVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FarRule {
    /// `max_far * factor`, optionally capped.
    Scaled { factor: f64, cap: Option<f64> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightRule {
    /// `floor(max_height * factor) + bonus_ft`.
    Scaled { factor: f64, bonus_ft: u32 },
    /// `floor(min(max_height * factor, max_height - margin_ft))`.
    ScaledWithMargin { factor: f64, margin_ft: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitRule {
    /// Density estimate, never below the target (or the fallback when no target).
    AtLeastTarget { sf_per_unit: f64, fallback_target: u32 },
    /// The target (or a density estimate), capped by a tighter density.
    TargetCapped { sf_per_unit: f64, cap_sf_per_unit: f64 },
    /// Pure density estimate.
    Density { sf_per_unit: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffordabilityRule {
    /// Zone requirement; the recorded share is the realized unit fraction.
    ZoneRequirementRealized,
    ZoneRequirement,
    /// Requirement times `boost` for affordability-focused intents, capped.
    IntentBoosted { boost: f64, cap: f64 },
    Scaled { factor: f64, cap: f64 },
    Fixed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParkingRule {
    /// `max(min_ratio * factor, floor)` spaces per unit.
    ScaledMinimum { factor: f64, floor: f64 },
    /// `min_ratio` reduced according to transit quality.
    TransitReduced { excellent: f64, otherwise: f64 },
    Fixed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommercialRule {
    /// Square feet, only in zones requiring ground-floor commercial use.
    CommercialZonesOnly(u32),
    AnyZone(u32),
}

/// Declarative recipe for deriving plan parameters from zone maxima.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationCoefficients {
    pub far: FarRule,
    pub height: HeightRule,
    pub units: UnitRule,
    pub affordability: AffordabilityRule,
    pub parking: ParkingRule,
    pub commercial: CommercialRule,
}

impl FarRule {
    pub fn apply(&self, max_far: f64) -> f64 {
        match *self {
            FarRule::Scaled { factor, cap } => {
                let far = max_far * factor;
                cap.map_or(far, |cap| far.min(cap))
            }
        }
    }
}

impl HeightRule {
    pub fn apply(&self, max_height_ft: u32) -> u32 {
        let max = f64::from(max_height_ft);
        match *self {
            HeightRule::Scaled { factor, bonus_ft } => (max * factor).floor() as u32 + bonus_ft,
            HeightRule::ScaledWithMargin { factor, margin_ft } => {
                let margin = f64::from(max_height_ft.saturating_sub(margin_ft));
                (max * factor).min(margin).floor() as u32
            }
        }
    }
}

impl UnitRule {
    pub fn apply(&self, lot_area_sf: f64, far: f64, target: Option<u32>) -> u32 {
        let density = |sf_per_unit: f64| (lot_area_sf * far / sf_per_unit).floor() as u32;
        match *self {
            UnitRule::AtLeastTarget { sf_per_unit, fallback_target } => {
                density(sf_per_unit).max(target.unwrap_or(fallback_target))
            }
            UnitRule::TargetCapped { sf_per_unit, cap_sf_per_unit } => target
                .unwrap_or_else(|| density(sf_per_unit))
                .min(density(cap_sf_per_unit)),
            UnitRule::Density { sf_per_unit } => density(sf_per_unit),
        }
    }
}

impl AffordabilityRule {
    /// Returns `(affordable_units, affordable_pct)`.
    pub fn apply(&self, total_units: u32, zone_req: f64, intent: PlanningIntent) -> (u32, f64) {
        let pct = match *self {
            AffordabilityRule::ZoneRequirementRealized | AffordabilityRule::ZoneRequirement => {
                zone_req
            }
            AffordabilityRule::IntentBoosted { boost, cap } => {
                let boost = if intent.boosts_affordability() { boost } else { 1.0 };
                (zone_req * boost).min(cap)
            }
            AffordabilityRule::Scaled { factor, cap } => (zone_req * factor).min(cap),
            AffordabilityRule::Fixed(pct) => pct,
        };

        let units = (f64::from(total_units) * pct).floor() as u32;
        let recorded_pct = match self {
            AffordabilityRule::ZoneRequirementRealized if total_units > 0 => {
                f64::from(units) / f64::from(total_units)
            }
            AffordabilityRule::ZoneRequirementRealized => 0.0,
            _ => pct,
        };
        (units, recorded_pct)
    }
}

impl ParkingRule {
    pub fn apply(&self, total_units: u32, min_ratio: f64, transit: TransitAccess) -> u32 {
        let per_unit = match *self {
            ParkingRule::ScaledMinimum { factor, floor } => (min_ratio * factor).max(floor),
            ParkingRule::TransitReduced { excellent, otherwise } => {
                let reduction = if transit == TransitAccess::Excellent {
                    excellent
                } else {
                    otherwise
                };
                min_ratio * reduction
            }
            ParkingRule::Fixed(ratio) => ratio,
        };
        (f64::from(total_units) * per_unit).floor() as u32
    }
}

impl CommercialRule {
    pub fn apply(&self, zone_requires_commercial: bool) -> u32 {
        match *self {
            CommercialRule::CommercialZonesOnly(sf) if zone_requires_commercial => sf,
            CommercialRule::CommercialZonesOnly(_) => 0,
            CommercialRule::AnyZone(sf) => sf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innovative_variant_only_for_focused_intents() {
        assert_eq!(PlanVariant::for_intent(PlanningIntent::HousingDevelopment).len(), 3);
        let variants = PlanVariant::for_intent(PlanningIntent::ClimateResilience);
        assert_eq!(variants.len(), 4);
        assert_eq!(variants[3], PlanVariant::Innovative(InnovativeFocus::Climate));
    }

    #[test]
    fn slugs_include_innovative_focus() {
        assert_eq!(PlanVariant::Moderate.slug(), "moderate");
        assert_eq!(
            PlanVariant::Innovative(InnovativeFocus::Displacement).slug(),
            "innovative_displacement"
        );
    }

    #[test]
    fn conservative_far_is_capped_at_two() {
        let far = PlanVariant::Conservative.coefficients().far;
        assert!((far.apply(4.0) - 2.0).abs() < 1e-9);
        assert!((far.apply(0.8) - 0.56).abs() < 1e-9);
    }

    #[test]
    fn conservative_height_keeps_margin_below_limit() {
        let height = PlanVariant::Conservative.coefficients().height;
        assert_eq!(height.apply(40), 32);
        assert_eq!(height.apply(85), 68);
    }

    #[test]
    fn climate_height_adds_elevation_bonus() {
        let height = PlanVariant::Innovative(InnovativeFocus::Climate).coefficients().height;
        assert_eq!(height.apply(40), 41);
    }

    #[test]
    fn conservative_units_never_below_target() {
        let units = PlanVariant::Conservative.coefficients().units;
        assert_eq!(units.apply(3000.0, 0.56, None), 10);
        assert_eq!(units.apply(3000.0, 0.56, Some(25)), 25);
        assert_eq!(units.apply(3000.0, 2.0, None), 10);
    }

    #[test]
    fn moderate_units_are_capped_by_density() {
        let units = PlanVariant::Moderate.coefficients().units;
        // 3000 * 2.7 / 600 = 13.5
        assert_eq!(units.apply(3000.0, 2.7, Some(40)), 13);
        assert_eq!(units.apply(3000.0, 2.7, None), 11);
    }

    #[test]
    fn moderate_affordability_boost_depends_on_intent() {
        let rule = PlanVariant::Moderate.coefficients().affordability;
        let (_, boosted) = rule.apply(20, 0.20, PlanningIntent::AntiDisplacement);
        let (_, plain) = rule.apply(20, 0.20, PlanningIntent::TransitImprovement);
        assert!((boosted - 0.24).abs() < 1e-9);
        assert!((plain - 0.20).abs() < 1e-9);
    }

    #[test]
    fn realized_affordability_reflects_rounding() {
        let rule = PlanVariant::Conservative.coefficients().affordability;
        let (units, pct) = rule.apply(10, 0.12, PlanningIntent::HousingDevelopment);
        assert_eq!(units, 1);
        assert!((pct - 0.1).abs() < 1e-9);
    }

    #[test]
    fn moderate_parking_reduced_with_excellent_transit() {
        let rule = PlanVariant::Moderate.coefficients().parking;
        assert_eq!(rule.apply(10, 1.0, TransitAccess::Excellent), 7);
        assert_eq!(rule.apply(10, 1.0, TransitAccess::Limited), 9);
    }

    #[test]
    fn commercial_space_respects_zone_requirement() {
        assert_eq!(PlanVariant::Aggressive.coefficients().commercial.apply(false), 0);
        assert_eq!(PlanVariant::Aggressive.coefficients().commercial.apply(true), 1500);
        let walk = PlanVariant::Innovative(InnovativeFocus::Walkability).coefficients();
        assert_eq!(walk.commercial.apply(false), 2000);
    }
}
