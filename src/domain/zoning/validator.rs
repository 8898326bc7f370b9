//! Constraint Validator - Zoning checks, unit estimates and upzoning.
//!
//! All operations are stateless queries over a [`ZoningRulebook`].

use serde::{Deserialize, Serialize};

use super::{
    normalize_area_key, ValidationOutcome, Violation, ViolationKind, ZoneType, ZoningRulebook,
    DEFAULT_NEIGHBORHOOD_ZONE, UPZONE_HIERARCHY,
};
use crate::domain::foundation::ValidationError;

/// Share of gross floor area that becomes dwelling space.
pub const DEFAULT_BUILDING_EFFICIENCY: f64 = 0.85;

/// Projects below this size carry no inclusionary requirement.
pub const INCLUSIONARY_THRESHOLD_UNITS: u32 = 10;

/// A development proposal checked against a zone's rules.
///
/// Constructed through [`Proposal::new`] or deserialization, both of which
/// reject negative and non-finite dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProposal")]
pub struct Proposal {
    pub zone: ZoneType,
    pub far: f64,
    pub height_ft: u32,
    pub lot_area_sf: f64,
    pub num_units: u32,
    pub ground_floor_commercial_sf: u32,
}

#[derive(Deserialize)]
struct RawProposal {
    zone: ZoneType,
    far: f64,
    height_ft: u32,
    lot_area_sf: f64,
    num_units: u32,
    #[serde(default)]
    ground_floor_commercial_sf: u32,
}

impl TryFrom<RawProposal> for Proposal {
    type Error = ValidationError;

    fn try_from(raw: RawProposal) -> Result<Self, Self::Error> {
        Ok(Proposal::new(raw.zone, raw.far, raw.height_ft, raw.lot_area_sf, raw.num_units)?
            .with_ground_floor_commercial(raw.ground_floor_commercial_sf))
    }
}

impl Proposal {
    /// Creates a proposal with no modeled ground-floor commercial space.
    pub fn new(
        zone: ZoneType,
        far: f64,
        height_ft: u32,
        lot_area_sf: f64,
        num_units: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            zone,
            far: ValidationError::require_non_negative("far", far)?,
            height_ft,
            lot_area_sf: ValidationError::require_non_negative("lot_area_sf", lot_area_sf)?,
            num_units,
            ground_floor_commercial_sf: 0,
        })
    }

    /// Sets the modeled ground-floor commercial area.
    pub fn with_ground_floor_commercial(mut self, sf: u32) -> Self {
        self.ground_floor_commercial_sf = sf;
        self
    }
}

/// Buildable unit estimate for a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitEstimate {
    pub total: u32,
    pub affordable: u32,
    pub market_rate: u32,
}

/// Outcome of searching the density hierarchy for a target unit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpzoneSuggestion {
    /// `to` is the lowest-density zone whose estimate meets the target.
    Achievable {
        from: ZoneType,
        to: ZoneType,
        estimated_units: u32,
    },
    /// Even the densest zone falls short.
    NotAchievable {
        from: ZoneType,
        max_estimated_units: u32,
    },
}

impl UpzoneSuggestion {
    /// The suggested zone, if the target can be met.
    pub fn zone(&self) -> Option<ZoneType> {
        match self {
            UpzoneSuggestion::Achievable { to, .. } => Some(*to),
            UpzoneSuggestion::NotAchievable { .. } => None,
        }
    }

    pub fn is_achievable(&self) -> bool {
        matches!(self, UpzoneSuggestion::Achievable { .. })
    }
}

/// Validator bound to a rulebook.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintValidator<'a> {
    rulebook: &'a ZoningRulebook,
}

impl<'a> ConstraintValidator<'a> {
    pub fn new(rulebook: &'a ZoningRulebook) -> Self {
        Self { rulebook }
    }

    /// Validator over the standard planning-code rulebook.
    pub fn standard() -> ConstraintValidator<'static> {
        ConstraintValidator::new(ZoningRulebook::standard())
    }

    pub fn rulebook(&self) -> &'a ZoningRulebook {
        self.rulebook
    }

    /// Checks a proposal against its zone's rules.
    ///
    /// # Edge Cases
    /// - Unknown zone: a single error violation, nothing else is checked
    /// - Values exactly at the limit are compliant
    pub fn validate_proposal(&self, proposal: &Proposal) -> ValidationOutcome {
        let Some(rule) = self.rulebook.rule(proposal.zone) else {
            return ValidationOutcome::from_violations(vec![Violation::error(
                ViolationKind::UnknownZone,
                0.0,
                0.0,
                format!("Zone type {} not recognized", proposal.zone),
            )]);
        };

        let mut violations = Vec::new();

        if proposal.far > rule.max_far {
            violations.push(Violation::error(
                ViolationKind::FloorAreaRatio,
                proposal.far,
                rule.max_far,
                format!("Reduce FAR to {} or request variance", rule.max_far),
            ));
        }

        if proposal.height_ft > rule.max_height_ft {
            violations.push(Violation::error(
                ViolationKind::BuildingHeight,
                f64::from(proposal.height_ft),
                f64::from(rule.max_height_ft),
                format!("Reduce height to {}ft or request variance", rule.max_height_ft),
            ));
        }

        if proposal.num_units >= INCLUSIONARY_THRESHOLD_UNITS {
            let required = f64::from(proposal.num_units) * rule.affordable_housing_req;
            violations.push(Violation::warning(
                ViolationKind::InclusionaryHousing,
                0.0,
                required,
                format!(
                    "Must include {:.0} affordable units ({:.0}%)",
                    required,
                    rule.affordable_housing_req * 100.0
                ),
            ));
        }

        if rule.ground_floor_commercial && proposal.ground_floor_commercial_sf == 0 {
            violations.push(Violation::warning(
                ViolationKind::GroundFloorCommercial,
                0.0,
                1.0,
                format!(
                    "Ground floor must be commercial/retail in {} zones",
                    proposal.zone
                ),
            ));
        }

        ValidationOutcome::from_violations(violations)
    }

    /// Estimates buildable units at the standard building efficiency.
    pub fn estimate_units(&self, zone: ZoneType, lot_area_sf: f64) -> UnitEstimate {
        self.estimate_units_with_efficiency(zone, lot_area_sf, DEFAULT_BUILDING_EFFICIENCY)
    }

    /// Estimates buildable units for a lot at the zone's maximum FAR.
    ///
    /// Negative or non-finite lot areas count as zero.
    pub fn estimate_units_with_efficiency(
        &self,
        zone: ZoneType,
        lot_area_sf: f64,
        efficiency: f64,
    ) -> UnitEstimate {
        let Some(rule) = self.rulebook.rule(zone) else {
            return UnitEstimate::default();
        };

        let lot = if lot_area_sf.is_finite() { lot_area_sf.max(0.0) } else { 0.0 };
        let buildable_sf = lot * rule.max_far * efficiency.max(0.0);
        let total = (buildable_sf / self.rulebook.avg_unit_size(zone)).floor() as u32;

        let affordable = if total >= INCLUSIONARY_THRESHOLD_UNITS {
            (f64::from(total) * rule.affordable_housing_req).floor() as u32
        } else {
            0
        };

        UnitEstimate {
            total,
            affordable,
            market_rate: total - affordable,
        }
    }

    /// Finds the lowest-density zone that fits `target_units` on the lot.
    ///
    /// The walk always starts from the bottom of the hierarchy, so the
    /// suggestion may be at or below `current_zone`.
    pub fn suggest_upzone(
        &self,
        current_zone: ZoneType,
        target_units: u32,
        lot_area_sf: f64,
    ) -> UpzoneSuggestion {
        let mut max_estimated_units = 0;
        for zone in UPZONE_HIERARCHY {
            let estimate = self.estimate_units(*zone, lot_area_sf);
            if estimate.total >= target_units {
                return UpzoneSuggestion::Achievable {
                    from: current_zone,
                    to: *zone,
                    estimated_units: estimate.total,
                };
            }
            max_estimated_units = max_estimated_units.max(estimate.total);
        }

        UpzoneSuggestion::NotAchievable {
            from: current_zone,
            max_estimated_units,
        }
    }

    /// Typical zoning of a neighborhood; unlisted names map to RM-2.
    pub fn neighborhood_zoning_lookup(&self, name: &str) -> ZoneType {
        self.rulebook
            .neighborhood_zone(&normalize_area_key(name))
            .unwrap_or(DEFAULT_NEIGHBORHOOD_ZONE)
    }

    /// First zone in the hierarchy, starting at `start`, whose limits admit
    /// both the FAR and the height.
    pub fn first_zone_admitting(&self, start: ZoneType, far: f64, height_ft: u32) -> Option<ZoneType> {
        let from = start.hierarchy_level().unwrap_or(0);
        UPZONE_HIERARCHY[from..].iter().copied().find(|zone| {
            self.rulebook
                .rule(*zone)
                .map(|rule| far <= rule.max_far && height_ft <= rule.max_height_ft)
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ConstraintValidator<'static> {
        ConstraintValidator::standard()
    }

    fn proposal(zone: ZoneType, far: f64, height: u32, lot: f64, units: u32) -> Proposal {
        Proposal::new(zone, far, height, lot, units).unwrap()
    }

    #[test]
    fn rh1_within_limits_is_valid() {
        let outcome = validator().validate_proposal(&proposal(ZoneType::Rh1, 0.8, 40, 2500.0, 1));
        assert!(outcome.is_valid);
        assert_eq!(outcome.errors().count(), 0);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn rh1_over_far_and_height_emits_two_errors() {
        let outcome = validator().validate_proposal(&proposal(ZoneType::Rh1, 1.5, 60, 2500.0, 1));
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors().count(), 2);

        let far = outcome.find(ViolationKind::FloorAreaRatio).unwrap();
        assert_eq!(far.max_allowed, 0.8);
        assert_eq!(far.current_value, 1.5);
        assert_eq!(far.suggestion, "Reduce FAR to 0.8 or request variance");

        let height = outcome.find(ViolationKind::BuildingHeight).unwrap();
        assert_eq!(height.max_allowed, 40.0);
        assert_eq!(height.suggestion, "Reduce height to 40ft or request variance");
    }

    #[test]
    fn far_at_limit_is_compliant() {
        let outcome = validator().validate_proposal(&proposal(ZoneType::Rm2, 2.5, 65, 3000.0, 5));
        assert!(outcome.find(ViolationKind::FloorAreaRatio).is_none());
        assert!(outcome.find(ViolationKind::BuildingHeight).is_none());
    }

    #[test]
    fn inclusionary_warning_does_not_block_validity() {
        let outcome = validator().validate_proposal(&proposal(ZoneType::Rm2, 2.0, 50, 3000.0, 20));
        assert!(outcome.is_valid);
        let warning = outcome.find(ViolationKind::InclusionaryHousing).unwrap();
        assert!(!warning.is_error());
        assert!((warning.max_allowed - 3.6).abs() < 1e-9);
        assert_eq!(warning.suggestion, "Must include 4 affordable units (18%)");
    }

    #[test]
    fn nine_units_carry_no_inclusionary_warning() {
        let outcome = validator().validate_proposal(&proposal(ZoneType::Rm2, 2.0, 50, 3000.0, 9));
        assert!(outcome.find(ViolationKind::InclusionaryHousing).is_none());
    }

    #[test]
    fn commercial_zone_without_ground_floor_use_warns() {
        let bare = validator().validate_proposal(&proposal(ZoneType::Nct3, 2.0, 40, 3000.0, 5));
        assert!(bare.is_valid);
        assert!(bare.find(ViolationKind::GroundFloorCommercial).is_some());

        let with_retail = validator().validate_proposal(
            &proposal(ZoneType::Nct3, 2.0, 40, 3000.0, 5).with_ground_floor_commercial(500),
        );
        assert!(with_retail.find(ViolationKind::GroundFloorCommercial).is_none());
    }

    #[test]
    fn unknown_zone_fails_closed_with_single_error() {
        let outcome = validator().validate_proposal(&proposal(ZoneType::Pdr1, 0.5, 20, 2500.0, 50));
        assert!(!outcome.is_valid);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].rule, ViolationKind::UnknownZone);
    }

    #[test]
    fn proposal_rejects_negative_and_nan_dimensions() {
        assert!(Proposal::new(ZoneType::Rh1, -0.1, 40, 2500.0, 1).is_err());
        assert!(Proposal::new(ZoneType::Rh1, 0.8, 40, f64::NAN, 1).is_err());
    }

    #[test]
    fn proposal_deserializes_with_boundary_checks() {
        let ok: Proposal = serde_json::from_str(
            r#"{"zone":"RH-1","far":0.8,"height_ft":40,"lot_area_sf":2500,"num_units":1}"#,
        )
        .unwrap();
        assert_eq!(ok.ground_floor_commercial_sf, 0);

        let bad = serde_json::from_str::<Proposal>(
            r#"{"zone":"RH-1","far":-1,"height_ft":40,"lot_area_sf":2500,"num_units":1}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn density_ordering_holds_across_zones() {
        let v = validator();
        let nct4 = v.estimate_units(ZoneType::Nct4, 5000.0);
        let nct3 = v.estimate_units(ZoneType::Nct3, 5000.0);
        let rh1 = v.estimate_units(ZoneType::Rh1, 5000.0);

        assert_eq!(nct4.total, 24);
        assert_eq!(nct3.total, 15);
        assert_eq!(rh1.total, 1);
        assert!(nct4.total > nct3.total && nct3.total > rh1.total);
    }

    #[test]
    fn affordable_units_only_from_ten_units() {
        let v = validator();
        let nct4 = v.estimate_units(ZoneType::Nct4, 5000.0);
        assert_eq!(nct4.affordable, 6);
        assert_eq!(nct4.market_rate, 18);

        let rh1 = v.estimate_units(ZoneType::Rh1, 5000.0);
        assert_eq!(rh1.affordable, 0);
        assert_eq!(rh1.market_rate, 1);
    }

    #[test]
    fn estimate_for_unknown_zone_is_zero() {
        assert_eq!(
            validator().estimate_units(ZoneType::Umu, 5000.0),
            UnitEstimate::default()
        );
    }

    #[test]
    fn negative_lot_area_estimates_zero_units() {
        assert_eq!(validator().estimate_units(ZoneType::Nct4, -100.0).total, 0);
    }

    #[test]
    fn upzone_returns_first_zone_meeting_target() {
        // 5000 sf: RH-1 1, RH-2 6, RM-1 9, RM-2 10
        let suggestion = validator().suggest_upzone(ZoneType::Rh1, 10, 5000.0);
        assert_eq!(suggestion.zone(), Some(ZoneType::Rm2));
        assert!(suggestion.is_achievable());
    }

    #[test]
    fn upzone_reports_not_achievable_past_densest_zone() {
        let suggestion = validator().suggest_upzone(ZoneType::Rh1, 500, 5000.0);
        assert_eq!(
            suggestion,
            UpzoneSuggestion::NotAchievable {
                from: ZoneType::Rh1,
                max_estimated_units: 24,
            }
        );
    }

    #[test]
    fn neighborhood_lookup_normalizes_names() {
        let v = validator();
        assert_eq!(v.neighborhood_zoning_lookup("Marina District"), ZoneType::Rh1);
        assert_eq!(v.neighborhood_zoning_lookup("Hayes Valley"), ZoneType::Nct3);
        assert_eq!(v.neighborhood_zoning_lookup("mission"), ZoneType::Nct4);
        assert_eq!(v.neighborhood_zoning_lookup("Sunset"), ZoneType::Rm2);
    }

    #[test]
    fn first_zone_admitting_walks_upward() {
        let v = validator();
        assert_eq!(v.first_zone_admitting(ZoneType::Rh1, 1.5, 45), Some(ZoneType::Rm1));
        assert_eq!(v.first_zone_admitting(ZoneType::Nct4, 5.0, 90), None);
    }
}
