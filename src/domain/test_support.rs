//! Plan fixtures shared by domain unit tests.

use crate::domain::foundation::PlanId;
use crate::domain::planning::{
    Archetype, ComplianceWeights, DraftPlan, InnovativeFocus, PlanVariant, ValidatedPlan,
};
use crate::domain::zoning::{ConstraintValidator, ZoneType};

/// An RM-2 plan on a 3000 sf lot with one parking space per unit.
pub(crate) fn draft_plan(
    archetype: Archetype,
    total_units: u32,
    affordable_units: u32,
    affordable_pct: f64,
) -> DraftPlan {
    let variant = match archetype {
        Archetype::Conservative => PlanVariant::Conservative,
        Archetype::Moderate => PlanVariant::Moderate,
        Archetype::Aggressive => PlanVariant::Aggressive,
        Archetype::Innovative => PlanVariant::Innovative(InnovativeFocus::Displacement),
    };

    DraftPlan {
        plan_id: PlanId::for_area("test", &variant.slug()),
        variant,
        name: format!("Test {} plan", archetype),
        description: String::new(),
        zone: ZoneType::Rm2,
        far: 2.0,
        height_ft: 40,
        total_units,
        lot_area_sf: 3000.0,
        affordable_units,
        affordable_pct,
        parking_spaces: total_units,
        ground_floor_commercial_sf: 0,
        required_variances: Vec::new(),
        design_rationale: Vec::new(),
        policy_alignment: Vec::new(),
    }
}

/// [`draft_plan`] validated against the standard rulebook.
pub(crate) fn validated_plan(
    archetype: Archetype,
    total_units: u32,
    affordable_units: u32,
    affordable_pct: f64,
) -> ValidatedPlan {
    draft_plan(archetype, total_units, affordable_units, affordable_pct)
        .validate(&ConstraintValidator::standard(), &ComplianceWeights::default())
}
