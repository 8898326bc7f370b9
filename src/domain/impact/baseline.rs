//! Per-area baseline constants used by impact scoring.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::zoning::normalize_area_key;

/// Static facts about an area before development.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBaseline {
    pub existing_units: u32,
    /// Current walk score, 0-100.
    pub walk_score: f64,
    /// Multiplier on walkability gains; higher where there is more room to improve.
    pub walk_potential: f64,
    /// Current transit accessibility, 0-1.
    pub transit_baseline: f64,
    pub transit_potential: f64,
    pub traffic_multiplier: f64,
    pub gentrification_pressure: f64,
    pub property_multiplier: f64,
    pub flood_risk: f64,
    pub data_completeness: f64,
}

impl Default for AreaBaseline {
    fn default() -> Self {
        Self {
            existing_units: 1000,
            walk_score: 75.0,
            walk_potential: 1.0,
            transit_baseline: 0.6,
            transit_potential: 1.0,
            traffic_multiplier: 1.0,
            gentrification_pressure: 0.5,
            property_multiplier: 1.1,
            flood_risk: 0.3,
            data_completeness: 0.70,
        }
    }
}

/// Where the live part of a baseline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineSource {
    /// Fetched from the baseline service for this request.
    Live,
    /// Static fallback constants.
    Static,
}

/// The externally fetchable part of a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineSnapshot {
    pub existing_units: u32,
    pub source: BaselineSource,
}

/// Baseline in effect for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBaseline {
    pub area_key: String,
    pub baseline: AreaBaseline,
    pub source: BaselineSource,
}

impl ResolvedBaseline {
    pub fn is_live(&self) -> bool {
        self.source == BaselineSource::Live
    }
}

/// Immutable lookup of area baselines with a default for unlisted areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineCatalog {
    areas: HashMap<String, AreaBaseline>,
    #[serde(default)]
    default: AreaBaseline,
}

impl BaselineCatalog {
    pub fn new(areas: HashMap<String, AreaBaseline>, default: AreaBaseline) -> Self {
        let areas = areas
            .into_iter()
            .map(|(key, baseline)| (normalize_area_key(&key), baseline))
            .collect();
        Self { areas, default }
    }

    /// Baselines for the three surveyed neighborhoods.
    pub fn standard() -> Self {
        let defaults = AreaBaseline::default();
        let areas = HashMap::from([
            (
                "hayes_valley".to_string(),
                AreaBaseline {
                    walk_score: 85.0,
                    walk_potential: 0.8,
                    transit_baseline: 0.9,
                    transit_potential: 1.0,
                    traffic_multiplier: 0.7,
                    gentrification_pressure: 0.7,
                    property_multiplier: 1.2,
                    flood_risk: 0.1,
                    data_completeness: 0.85,
                    ..defaults.clone()
                },
            ),
            (
                "marina".to_string(),
                AreaBaseline {
                    walk_score: 70.0,
                    walk_potential: 1.5,
                    transit_baseline: 0.4,
                    transit_potential: 1.5,
                    traffic_multiplier: 1.3,
                    gentrification_pressure: 0.3,
                    property_multiplier: 1.5,
                    flood_risk: 0.8,
                    data_completeness: 0.75,
                    ..defaults.clone()
                },
            ),
            (
                "mission".to_string(),
                AreaBaseline {
                    walk_score: 88.0,
                    walk_potential: 1.0,
                    transit_baseline: 0.8,
                    transit_potential: 1.0,
                    traffic_multiplier: 1.0,
                    gentrification_pressure: 0.8,
                    property_multiplier: 1.0,
                    flood_risk: 0.2,
                    data_completeness: 0.90,
                    ..defaults.clone()
                },
            ),
        ]);
        Self::new(areas, defaults)
    }

    /// Baseline for an area key or display name.
    pub fn lookup(&self, area: &str) -> &AreaBaseline {
        self.areas
            .get(&normalize_area_key(area))
            .unwrap_or(&self.default)
    }

    /// The static snapshot for an area.
    pub fn static_snapshot(&self, area: &str) -> BaselineSnapshot {
        BaselineSnapshot {
            existing_units: self.lookup(area).existing_units,
            source: BaselineSource::Static,
        }
    }

    /// Combines the static baseline with a fetched snapshot.
    pub fn resolve(&self, area: &str, snapshot: BaselineSnapshot) -> ResolvedBaseline {
        let mut baseline = self.lookup(area).clone();
        baseline.existing_units = snapshot.existing_units;
        ResolvedBaseline {
            area_key: normalize_area_key(area),
            baseline,
            source: snapshot.source,
        }
    }

    /// Baseline resolved purely from static constants.
    pub fn resolve_static(&self, area: &str) -> ResolvedBaseline {
        self.resolve(area, self.static_snapshot(area))
    }
}
