//! ZoneType enum and the density hierarchy used for upzoning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Planning-code zoning classifications.
///
/// Not every classification carries a rule in the standard rulebook;
/// lookups for those fail closed in the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoneType {
    /// Residential House, One-Family.
    #[serde(rename = "RH-1")]
    Rh1,
    /// Residential House, Two-Family.
    #[serde(rename = "RH-2")]
    Rh2,
    /// Residential Mixed, Low Density.
    #[serde(rename = "RM-1")]
    Rm1,
    /// Residential Mixed, Moderate Density.
    #[serde(rename = "RM-2")]
    Rm2,
    /// Residential Mixed, High Density.
    #[serde(rename = "RM-3")]
    Rm3,
    /// Neighborhood Commercial Transit, Small Scale.
    #[serde(rename = "NCT-2")]
    Nct2,
    /// Neighborhood Commercial Transit, Moderate Scale.
    #[serde(rename = "NCT-3")]
    Nct3,
    /// Neighborhood Commercial Transit, Large Scale.
    #[serde(rename = "NCT-4")]
    Nct4,
    /// Production, Distribution, Repair.
    #[serde(rename = "PDR-1")]
    Pdr1,
    /// Urban Mixed Use.
    #[serde(rename = "UMU")]
    Umu,
}

/// Zones ordered from lowest to highest residential density.
pub const UPZONE_HIERARCHY: &[ZoneType] = &[
    ZoneType::Rh1,
    ZoneType::Rh2,
    ZoneType::Rm1,
    ZoneType::Rm2,
    ZoneType::Nct2,
    ZoneType::Nct3,
    ZoneType::Nct4,
];

impl ZoneType {
    /// Returns all zone types.
    pub fn all() -> &'static [ZoneType] {
        &[
            ZoneType::Rh1,
            ZoneType::Rh2,
            ZoneType::Rm1,
            ZoneType::Rm2,
            ZoneType::Rm3,
            ZoneType::Nct2,
            ZoneType::Nct3,
            ZoneType::Nct4,
            ZoneType::Pdr1,
            ZoneType::Umu,
        ]
    }

    /// Returns the planning-code designation, e.g. `"NCT-3"`.
    pub fn code(self) -> &'static str {
        match self {
            ZoneType::Rh1 => "RH-1",
            ZoneType::Rh2 => "RH-2",
            ZoneType::Rm1 => "RM-1",
            ZoneType::Rm2 => "RM-2",
            ZoneType::Rm3 => "RM-3",
            ZoneType::Nct2 => "NCT-2",
            ZoneType::Nct3 => "NCT-3",
            ZoneType::Nct4 => "NCT-4",
            ZoneType::Pdr1 => "PDR-1",
            ZoneType::Umu => "UMU",
        }
    }

    /// Position in [`UPZONE_HIERARCHY`], if the zone participates in it.
    pub fn hierarchy_level(self) -> Option<usize> {
        UPZONE_HIERARCHY.iter().position(|z| *z == self)
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ZoneType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('_', "-");
        ZoneType::all()
            .iter()
            .copied()
            .find(|z| z.code() == normalized)
            .ok_or_else(|| {
                ValidationError::invalid_format("zone_type", format!("unrecognized zone '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("nct-3".parse::<ZoneType>().unwrap(), ZoneType::Nct3);
        assert_eq!(" RH_1 ".parse::<ZoneType>().unwrap(), ZoneType::Rh1);
        assert_eq!("UMU".parse::<ZoneType>().unwrap(), ZoneType::Umu);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!("C-3-O".parse::<ZoneType>().is_err());
    }

    #[test]
    fn hierarchy_runs_low_to_high() {
        assert_eq!(ZoneType::Rh1.hierarchy_level(), Some(0));
        assert_eq!(ZoneType::Nct4.hierarchy_level(), Some(6));
        assert_eq!(ZoneType::Pdr1.hierarchy_level(), None);
    }

    #[test]
    fn serializes_to_planning_code() {
        assert_eq!(serde_json::to_string(&ZoneType::Nct4).unwrap(), "\"NCT-4\"");
        let z: ZoneType = serde_json::from_str("\"RM-2\"").unwrap();
        assert_eq!(z, ZoneType::Rm2);
    }

    #[test]
    fn display_matches_code() {
        for zone in ZoneType::all() {
            assert_eq!(zone.to_string(), zone.code());
        }
    }
}
