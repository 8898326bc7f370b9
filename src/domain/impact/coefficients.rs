//! Per-archetype impact coefficients.

use serde::{Deserialize, Serialize};

use crate::domain::planning::Archetype;

/// Multipliers and constants that differ between archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactCoefficients {
    pub base_displacement_risk: f64,
    pub walk_bonus: f64,
    pub transit_bonus: f64,
    pub bike_infrastructure: f64,
    pub gentrification_multiplier: f64,
    pub community_benefit_bonus: f64,
    pub cost_per_unit: f64,
    pub climate_resilience: f64,
    pub energy_efficiency: f64,
}

/// One row of coefficients per archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactCoefficientTable {
    pub conservative: ImpactCoefficients,
    pub moderate: ImpactCoefficients,
    pub aggressive: ImpactCoefficients,
    pub innovative: ImpactCoefficients,
}

impl ImpactCoefficientTable {
    pub fn for_archetype(&self, archetype: Archetype) -> &ImpactCoefficients {
        match archetype {
            Archetype::Conservative => &self.conservative,
            Archetype::Moderate => &self.moderate,
            Archetype::Aggressive => &self.aggressive,
            Archetype::Innovative => &self.innovative,
        }
    }
}

impl Default for ImpactCoefficientTable {
    fn default() -> Self {
        Self {
            conservative: ImpactCoefficients {
                base_displacement_risk: 0.1,
                walk_bonus: 0.5,
                transit_bonus: 0.0,
                bike_infrastructure: 0.5,
                gentrification_multiplier: 0.8,
                community_benefit_bonus: 0.0,
                cost_per_unit: 400_000.0,
                climate_resilience: 0.6,
                energy_efficiency: 0.6,
            },
            moderate: ImpactCoefficients {
                base_displacement_risk: 0.1,
                walk_bonus: 1.0,
                transit_bonus: 0.0,
                bike_infrastructure: 1.0,
                gentrification_multiplier: 1.0,
                community_benefit_bonus: 0.0,
                cost_per_unit: 500_000.0,
                climate_resilience: 0.7,
                energy_efficiency: 0.6,
            },
            aggressive: ImpactCoefficients {
                base_displacement_risk: 0.4,
                walk_bonus: 1.5,
                transit_bonus: 0.05,
                bike_infrastructure: 1.5,
                gentrification_multiplier: 1.3,
                community_benefit_bonus: 0.0,
                cost_per_unit: 600_000.0,
                climate_resilience: 0.6,
                energy_efficiency: 0.6,
            },
            innovative: ImpactCoefficients {
                base_displacement_risk: 0.2,
                walk_bonus: 3.0,
                transit_bonus: 0.1,
                bike_infrastructure: 3.0,
                gentrification_multiplier: 0.9,
                community_benefit_bonus: 0.3,
                cost_per_unit: 550_000.0,
                climate_resilience: 0.9,
                energy_efficiency: 0.8,
            },
        }
    }
}
