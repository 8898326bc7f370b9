//! Scoring overrides configuration
//!
//! Thresholds and weights default to the built-in profile. An optional YAML
//! document overrides any subset of them:
//!
//! ```yaml
//! ranking:
//!   overall_impact: 0.5
//! plan_selection:
//!   innovation: 0.15
//! thresholds:
//!   confidence:
//!     base: 0.7
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use super::error::{ConfigError, ValidationError};
use crate::domain::tables::ScoringProfile;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    /// Path to a YAML scoring overrides document
    pub overrides_path: Option<PathBuf>,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.overrides_path {
            if !path.is_file() {
                return Err(ValidationError::ScoringFileNotFound(path.clone()));
            }
        }
        Ok(())
    }

    /// Load the effective scoring profile.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the overrides file cannot be read or parsed,
    /// or holds values outside their valid range.
    pub fn load_profile(&self) -> Result<ScoringProfile, ConfigError> {
        let Some(path) = &self.overrides_path else {
            return Ok(ScoringProfile::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::ScoringFileUnreadable {
                path: path.clone(),
                source,
            }
        })?;
        let profile: ScoringProfile =
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::ScoringFileInvalid {
                path: path.clone(),
                source,
            })?;

        validate_profile(&profile)?;
        Ok(profile)
    }
}

fn validate_profile(profile: &ScoringProfile) -> Result<(), ValidationError> {
    let ranking = &profile.ranking;
    let synthesis = &profile.synthesis;
    let selection = &profile.plan_selection;
    let equity = &profile.thresholds.equity;
    let comparison = &profile.comparison;
    let weights = [
        ("plan_selection.compliance", selection.compliance),
        ("plan_selection.target_achievement", selection.target_achievement),
        ("plan_selection.policy_alignment", selection.policy_alignment),
        ("plan_selection.innovation", selection.innovation),
        ("plan_selection.compliance_spread", selection.compliance_spread),
        ("plan_selection.parking_ratio_spread", selection.parking_ratio_spread),
        ("ranking.overall_impact", ranking.overall_impact),
        ("ranking.affordability", ranking.affordability),
        ("ranking.community_benefit", ranking.community_benefit),
        ("ranking.confidence", ranking.confidence),
        ("synthesis.housing", synthesis.housing),
        ("synthesis.accessibility", synthesis.accessibility),
        ("synthesis.equity", synthesis.equity),
        ("synthesis.economic", synthesis.economic),
        ("synthesis.environmental", synthesis.environmental),
        ("compliance.error_weight", profile.compliance.error_weight),
        ("compliance.warning_weight", profile.compliance.warning_weight),
        ("thresholds.equity.pressure_relief", equity.pressure_relief),
        ("thresholds.equity.affordability_benefit_bonus", equity.affordability_benefit_bonus),
        ("comparison.tradeoff_property_change", comparison.tradeoff_property_change),
        ("comparison.eir_stormwater", comparison.eir_stormwater),
    ];
    for (name, value) in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidScoringValue(name));
        }
    }

    let ratio = profile.compliance.minor_excess_ratio;
    if ratio.is_nan() || ratio < 1.0 {
        return Err(ValidationError::InvalidScoringValue(
            "compliance.minor_excess_ratio",
        ));
    }

    if !(0.0..=1.0).contains(&selection.form_target_share) {
        return Err(ValidationError::InvalidScoringValue(
            "plan_selection.form_target_share",
        ));
    }

    let shares = [
        ("thresholds.equity.pressure_relief_affordability", equity.pressure_relief_affordability),
        ("thresholds.equity.benefit_bonus_affordability", equity.benefit_bonus_affordability),
        ("thresholds.equity.base_community_benefit", equity.base_community_benefit),
        ("comparison.high_community_benefit", comparison.high_community_benefit),
        ("comparison.high_displacement_risk", comparison.high_displacement_risk),
        ("comparison.tradeoff_displacement_risk", comparison.tradeoff_displacement_risk),
        ("comparison.tradeoff_min_community_benefit", comparison.tradeoff_min_community_benefit),
        ("comparison.tradeoff_min_resilience", comparison.tradeoff_min_resilience),
    ];
    for (name, value) in shares {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::InvalidScoringValue(name));
        }
    }

    let confidence = &profile.thresholds.confidence;
    if !(0.0..=1.0).contains(&confidence.base) {
        return Err(ValidationError::InvalidScoringValue("thresholds.confidence.base"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn overrides(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_no_overrides_uses_default_profile() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.load_profile().unwrap(), ScoringProfile::default());
    }

    #[test]
    fn test_loads_partial_overrides() {
        let file = overrides("ranking:\n  overall_impact: 0.5\ncompliance:\n  error_weight: 0.3\n");
        let config = ScoringConfig {
            overrides_path: Some(file.path().to_path_buf()),
        };

        assert!(config.validate().is_ok());
        let profile = config.load_profile().unwrap();
        assert_eq!(profile.ranking.overall_impact, 0.5);
        assert_eq!(profile.ranking.affordability, 0.25);
        assert_eq!(profile.compliance.error_weight, 0.3);
        assert_eq!(profile.compliance.warning_weight, 0.05);
    }

    #[test]
    fn test_missing_file_fails_validation() {
        let config = ScoringConfig {
            overrides_path: Some(PathBuf::from("/nonexistent/scoring.yaml")),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ScoringFileNotFound(_))
        ));
        assert!(matches!(
            config.load_profile(),
            Err(ConfigError::ScoringFileUnreadable { .. })
        ));
    }

    #[test]
    fn test_malformed_yaml_is_reported() {
        let file = overrides("ranking: [not, a, map]\n");
        let config = ScoringConfig {
            overrides_path: Some(file.path().to_path_buf()),
        };
        assert!(matches!(
            config.load_profile(),
            Err(ConfigError::ScoringFileInvalid { .. })
        ));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let file = overrides("synthesis:\n  equity: -0.1\n");
        let config = ScoringConfig {
            overrides_path: Some(file.path().to_path_buf()),
        };
        assert!(matches!(
            config.load_profile(),
            Err(ConfigError::ValidationFailed(ValidationError::InvalidScoringValue(
                "synthesis.equity"
            )))
        ));
    }

    #[test]
    fn test_minor_excess_ratio_below_one_is_rejected() {
        let file = overrides("compliance:\n  minor_excess_ratio: 0.9\n");
        let config = ScoringConfig {
            overrides_path: Some(file.path().to_path_buf()),
        };
        assert!(config.load_profile().is_err());
    }

    #[test]
    fn test_loads_plan_selection_and_comparison_overrides() {
        let file = overrides(
            "plan_selection:\n  innovation: 0.2\ncomparison:\n  large_development_units: 40\n",
        );
        let config = ScoringConfig {
            overrides_path: Some(file.path().to_path_buf()),
        };
        let profile = config.load_profile().unwrap();
        assert_eq!(profile.plan_selection.innovation, 0.2);
        assert_eq!(profile.comparison.large_development_units, 40);
    }

    #[test]
    fn test_out_of_range_share_is_rejected() {
        let file = overrides("thresholds:\n  equity:\n    pressure_relief_affordability: 1.5\n");
        let config = ScoringConfig {
            overrides_path: Some(file.path().to_path_buf()),
        };
        assert!(matches!(
            config.load_profile(),
            Err(ConfigError::ValidationFailed(ValidationError::InvalidScoringValue(
                "thresholds.equity.pressure_relief_affordability"
            )))
        ));

        let file = overrides("plan_selection:\n  form_target_share: 2.0\n");
        let config = ScoringConfig {
            overrides_path: Some(file.path().to_path_buf()),
        };
        assert!(config.load_profile().is_err());
    }
}
