//! Named, overridable scoring constants for impact synthesis.
//!
//! Every field has a serde default, so an override file only needs the
//! values it changes.

use serde::{Deserialize, Serialize};

/// Weights of the five categories in the overall impact score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisWeights {
    pub housing: f64,
    pub accessibility: f64,
    pub equity: f64,
    pub economic: f64,
    pub environmental: f64,
    /// Cap on the normalized economic term before weighting.
    pub economic_cap: f64,
}

impl Default for SynthesisWeights {
    fn default() -> Self {
        Self {
            housing: 0.30,
            accessibility: 0.20,
            equity: 0.25,
            economic: 0.15,
            environmental: 0.10,
            economic_cap: 0.5,
        }
    }
}

/// Thresholds above which a benefit line is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitThresholds {
    pub new_units: u32,
    pub construction_jobs: u32,
}

impl Default for BenefitThresholds {
    fn default() -> Self {
        Self {
            new_units: 5,
            construction_jobs: 10,
        }
    }
}

/// Thresholds above which a concern line is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcernThresholds {
    pub displacement_risk: f64,
    pub gentrification_change: f64,
    pub stormwater: f64,
    pub traffic: f64,
    pub cost_per_unit: f64,
}

impl Default for ConcernThresholds {
    fn default() -> Self {
        Self {
            displacement_risk: 0.3,
            gentrification_change: 0.1,
            stormwater: 0.5,
            traffic: 0.3,
            cost_per_unit: 500_000.0,
        }
    }
}

/// Thresholds above which a mitigation line is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MitigationThresholds {
    /// Right of first refusal for existing tenants.
    pub severe_displacement_risk: f64,
    /// Community land trust opportunities.
    pub displacement_risk: f64,
    pub stormwater: f64,
    pub traffic: f64,
    pub cost_per_unit: f64,
}

impl Default for MitigationThresholds {
    fn default() -> Self {
        Self {
            severe_displacement_risk: 0.4,
            displacement_risk: 0.2,
            stormwater: 0.6,
            traffic: 0.5,
            cost_per_unit: 500_000.0,
        }
    }
}

/// Confidence assigned to each plan's impact estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceSettings {
    pub base: f64,
    /// Added when the unit baseline came from a live fetch.
    pub live_baseline_bonus: f64,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self {
            base: 0.75,
            live_baseline_bonus: 0.05,
        }
    }
}

/// Affordability cut-offs of the equity assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityThresholds {
    /// Affordable share above which gentrification pressure is relieved.
    pub pressure_relief_affordability: f64,
    /// Pressure removed by crossing `pressure_relief_affordability`.
    pub pressure_relief: f64,
    pub base_community_benefit: f64,
    /// Affordable share above which community benefit rises.
    pub benefit_bonus_affordability: f64,
    pub affordability_benefit_bonus: f64,
}

impl Default for EquityThresholds {
    fn default() -> Self {
        Self {
            pressure_relief_affordability: 0.20,
            pressure_relief: 0.2,
            base_community_benefit: 0.5,
            benefit_bonus_affordability: 0.25,
            affordability_benefit_bonus: 0.2,
        }
    }
}

/// All synthesis thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    pub benefits: BenefitThresholds,
    pub concerns: ConcernThresholds,
    pub mitigations: MitigationThresholds,
    pub confidence: ConfidenceSettings,
    pub equity: EquityThresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_weights_sum_to_one() {
        let w = SynthesisWeights::default();
        let sum = w.housing + w.accessibility + w.equity + w.economic + w.environmental;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let yaml = "concerns:\n  displacement_risk: 0.35\n";
        let thresholds: ScoringThresholds = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(thresholds.concerns.displacement_risk, 0.35);
        assert_eq!(thresholds.concerns.traffic, 0.3);
        assert_eq!(thresholds.mitigations, MitigationThresholds::default());
        assert_eq!(thresholds.benefits.new_units, 5);
        assert_eq!(thresholds.equity, EquityThresholds::default());
    }

    #[test]
    fn equity_cutoffs_are_overridable() {
        let yaml = "equity:\n  pressure_relief: 0.3\n";
        let thresholds: ScoringThresholds = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(thresholds.equity.pressure_relief, 0.3);
        assert_eq!(thresholds.equity.pressure_relief_affordability, 0.20);
    }
}
