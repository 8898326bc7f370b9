//! Planning brief - the structured input to scenario generation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;
use crate::domain::zoning::normalize_area_key;

/// Declared purpose of a planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningIntent {
    HousingDevelopment,
    TransitImprovement,
    MixedUseDevelopment,
    WalkabilityImprovement,
    ClimateResilience,
    AntiDisplacement,
}

impl PlanningIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningIntent::HousingDevelopment => "housing_development",
            PlanningIntent::TransitImprovement => "transit_improvement",
            PlanningIntent::MixedUseDevelopment => "mixed_use_development",
            PlanningIntent::WalkabilityImprovement => "walkability_improvement",
            PlanningIntent::ClimateResilience => "climate_resilience",
            PlanningIntent::AntiDisplacement => "anti_displacement",
        }
    }

    /// Human-readable title, e.g. "Anti Displacement".
    pub fn title(&self) -> &'static str {
        match self {
            PlanningIntent::HousingDevelopment => "Housing Development",
            PlanningIntent::TransitImprovement => "Transit Improvement",
            PlanningIntent::MixedUseDevelopment => "Mixed Use Development",
            PlanningIntent::WalkabilityImprovement => "Walkability Improvement",
            PlanningIntent::ClimateResilience => "Climate Resilience",
            PlanningIntent::AntiDisplacement => "Anti Displacement",
        }
    }

    /// Intents that raise the moderate plan's affordability target.
    pub fn boosts_affordability(&self) -> bool {
        matches!(
            self,
            PlanningIntent::HousingDevelopment | PlanningIntent::AntiDisplacement
        )
    }
}

impl fmt::Display for PlanningIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality of transit service in the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitAccess {
    Excellent,
    #[default]
    Good,
    Limited,
}

fn default_min_parking_ratio() -> f64 {
    1.0
}

/// The resolved planning area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaProfile {
    /// Area key such as `hayes_valley`; display names are accepted and normalized.
    pub key: String,
    pub display_name: String,
    /// Zoning code of the area. When absent the neighborhood table decides.
    #[serde(default)]
    pub zone_code: Option<String>,
    #[serde(default)]
    pub transit_access: TransitAccess,
    /// Minimum parking spaces per unit.
    #[serde(default = "default_min_parking_ratio")]
    pub min_parking_ratio: f64,
}

impl AreaProfile {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            zone_code: None,
            transit_access: TransitAccess::default(),
            min_parking_ratio: default_min_parking_ratio(),
        }
    }

    pub fn with_zone_code(mut self, zone_code: impl Into<String>) -> Self {
        self.zone_code = Some(zone_code.into());
        self
    }

    pub fn with_transit_access(mut self, transit_access: TransitAccess) -> Self {
        self.transit_access = transit_access;
        self
    }

    pub fn with_min_parking_ratio(mut self, ratio: f64) -> Self {
        self.min_parking_ratio = ratio;
        self
    }

    /// Normalized key used for table lookups and plan ids.
    pub fn area_key(&self) -> String {
        normalize_area_key(&self.key)
    }
}

/// Quantitative targets extracted from the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetMetrics {
    #[serde(default)]
    pub units: Option<u32>,
    /// Affordable share as a fraction, e.g. `0.25`.
    #[serde(default)]
    pub affordability_pct: Option<f64>,
    #[serde(default)]
    pub height_ft: Option<u32>,
    #[serde(default)]
    pub far: Option<f64>,
    #[serde(default)]
    pub parking_spaces: Option<u32>,
}

/// Structured brief produced by query interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningBrief {
    #[serde(default)]
    pub original_query: String,
    pub area: AreaProfile,
    pub intent: PlanningIntent,
    #[serde(default)]
    pub target_metrics: TargetMetrics,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub policy_considerations: Vec<String>,
}

impl PlanningBrief {
    pub fn new(area: AreaProfile, intent: PlanningIntent) -> Self {
        Self {
            original_query: String::new(),
            area,
            intent,
            target_metrics: TargetMetrics::default(),
            opportunities: Vec::new(),
            constraints: Vec::new(),
            policy_considerations: Vec::new(),
        }
    }

    pub fn with_target_units(mut self, units: u32) -> Self {
        self.target_metrics.units = Some(units);
        self
    }

    pub fn with_opportunities(mut self, opportunities: Vec<String>) -> Self {
        self.opportunities = opportunities;
        self
    }

    pub fn with_constraints(mut self, constraints: Vec<String>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Checks the numeric and textual fields of the brief.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.area.area_key().is_empty() {
            return Err(ValidationError::empty_field("area.key"));
        }
        ValidationError::require_non_negative("area.min_parking_ratio", self.area.min_parking_ratio)?;

        if let Some(pct) = self.target_metrics.affordability_pct {
            if !(0.0..=1.0).contains(&pct) {
                return Err(ValidationError::out_of_range(
                    "target_metrics.affordability_pct",
                    0.0,
                    1.0,
                    pct,
                ));
            }
        }
        if let Some(far) = self.target_metrics.far {
            ValidationError::require_non_negative("target_metrics.far", far)?;
        }
        Ok(())
    }

    /// True when any opportunity or constraint mentions `keyword`, ignoring case.
    pub fn mentions(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.opportunities
            .iter()
            .chain(self.constraints.iter())
            .any(|line| line.to_lowercase().contains(&keyword))
    }
}
