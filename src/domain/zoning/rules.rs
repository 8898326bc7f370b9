//! Static zoning rule tables.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ZoneType;

/// Average unit size used when a zone has no entry in the unit-size table.
pub const DEFAULT_AVG_UNIT_SIZE_SF: f64 = 800.0;

/// Zone assumed for areas missing from the neighborhood table.
pub const DEFAULT_NEIGHBORHOOD_ZONE: ZoneType = ZoneType::Rm2;

/// Dimensional and use constraints for one zoning district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoningRule {
    pub zone_type: ZoneType,
    pub max_far: f64,
    pub max_height_ft: u32,
    pub min_rear_yard_ft: u32,
    pub min_side_yard_ft: u32,
    pub parking_required: bool,
    pub ground_floor_commercial: bool,
    /// Inclusionary fraction applied to projects of ten or more units.
    pub affordable_housing_req: f64,
}

/// Immutable collection of zoning rules, unit sizes and neighborhood zoning.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoningRulebook {
    rules: HashMap<ZoneType, ZoningRule>,
    avg_unit_sizes: HashMap<ZoneType, f64>,
    neighborhood_zones: HashMap<String, ZoneType>,
}

static STANDARD: Lazy<ZoningRulebook> = Lazy::new(ZoningRulebook::build_standard);

impl ZoningRulebook {
    /// The planning-code rulebook, built once per process.
    pub fn standard() -> &'static ZoningRulebook {
        &STANDARD
    }

    /// Creates a rulebook from explicit tables.
    pub fn new(
        rules: impl IntoIterator<Item = ZoningRule>,
        avg_unit_sizes: HashMap<ZoneType, f64>,
        neighborhood_zones: HashMap<String, ZoneType>,
    ) -> Self {
        Self {
            rules: rules.into_iter().map(|r| (r.zone_type, r)).collect(),
            avg_unit_sizes,
            neighborhood_zones,
        }
    }

    /// Looks up the rule for a zone.
    pub fn rule(&self, zone: ZoneType) -> Option<&ZoningRule> {
        self.rules.get(&zone)
    }

    /// Average dwelling size for a zone, in square feet.
    pub fn avg_unit_size(&self, zone: ZoneType) -> f64 {
        self.avg_unit_sizes
            .get(&zone)
            .copied()
            .unwrap_or(DEFAULT_AVG_UNIT_SIZE_SF)
    }

    /// Typical zoning of a named neighborhood, keyed by normalized area key.
    pub fn neighborhood_zone(&self, area_key: &str) -> Option<ZoneType> {
        self.neighborhood_zones.get(area_key).copied()
    }

    /// Returns the number of zones with rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the rulebook holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn build_standard() -> Self {
        let rule = |zone_type, max_far, max_height_ft, side, parking, gfc, req| ZoningRule {
            zone_type,
            max_far,
            max_height_ft,
            min_rear_yard_ft: 15,
            min_side_yard_ft: side,
            parking_required: parking,
            ground_floor_commercial: gfc,
            affordable_housing_req: req,
        };

        let rules = vec![
            rule(ZoneType::Rh1, 0.8, 40, 4, true, false, 0.12),
            rule(ZoneType::Rh2, 1.2, 40, 4, true, false, 0.12),
            rule(ZoneType::Rm1, 1.8, 50, 0, true, false, 0.15),
            rule(ZoneType::Rm2, 2.5, 65, 0, true, false, 0.18),
            rule(ZoneType::Nct2, 2.2, 45, 0, false, true, 0.18),
            rule(ZoneType::Nct3, 3.0, 55, 0, false, true, 0.20),
            rule(ZoneType::Nct4, 4.0, 85, 0, false, true, 0.25),
        ];

        let avg_unit_sizes = HashMap::from([
            (ZoneType::Rh1, 2000.0),
            (ZoneType::Rm2, 1000.0),
            (ZoneType::Nct3, 800.0),
            (ZoneType::Nct4, 700.0),
        ]);

        let neighborhood_zones = HashMap::from([
            ("marina".to_string(), ZoneType::Rh1),
            ("hayes_valley".to_string(), ZoneType::Nct3),
            ("mission".to_string(), ZoneType::Nct4),
        ]);

        Self::new(rules, avg_unit_sizes, neighborhood_zones)
    }
}

/// Normalizes a neighborhood name into an area key.
///
/// `"Mission District"`, `"mission"` and `" MISSION "` all map to `"mission"`;
/// `"Hayes Valley"` maps to `"hayes_valley"`.
pub fn normalize_area_key(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let stripped = lowered
        .strip_suffix(" district")
        .unwrap_or(&lowered)
        .trim();
    stripped
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rulebook_covers_hierarchy() {
        let book = ZoningRulebook::standard();
        for zone in super::super::UPZONE_HIERARCHY {
            assert!(book.rule(*zone).is_some(), "missing rule for {}", zone);
        }
        assert_eq!(book.len(), 7);
    }

    #[test]
    fn standard_rulebook_has_no_rule_for_industrial() {
        assert!(ZoningRulebook::standard().rule(ZoneType::Pdr1).is_none());
        assert!(ZoningRulebook::standard().rule(ZoneType::Umu).is_none());
    }

    #[test]
    fn rh1_limits_match_planning_code() {
        let rule = ZoningRulebook::standard().rule(ZoneType::Rh1).unwrap();
        assert_eq!(rule.max_far, 0.8);
        assert_eq!(rule.max_height_ft, 40);
        assert!(rule.parking_required);
        assert!(!rule.ground_floor_commercial);
    }

    #[test]
    fn unit_size_falls_back_to_default() {
        let book = ZoningRulebook::standard();
        assert_eq!(book.avg_unit_size(ZoneType::Nct4), 700.0);
        assert_eq!(book.avg_unit_size(ZoneType::Rh2), DEFAULT_AVG_UNIT_SIZE_SF);
    }

    #[test]
    fn normalize_area_key_handles_display_names() {
        assert_eq!(normalize_area_key("Mission District"), "mission");
        assert_eq!(normalize_area_key("Hayes Valley"), "hayes_valley");
        assert_eq!(normalize_area_key("  MARINA "), "marina");
        assert_eq!(normalize_area_key("hayes_valley"), "hayes_valley");
    }
}
