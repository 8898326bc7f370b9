//! Planning tables - every static table and scoring constant in one value.
//!
//! Components never reach for globals; they borrow a `PlanningTables` passed
//! in by the caller. `standard()` is the built-in set, built once per process.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::analysis::{ComparisonThresholds, RankingWeights};
use crate::domain::impact::{
    BaselineCatalog, ImpactCoefficientTable, ScoringThresholds, SynthesisWeights,
};
use crate::domain::planning::{ComplianceWeights, PlanScoringWeights};
use crate::domain::zoning::ZoningRulebook;

/// Named, overridable scoring constants.
///
/// Every section has defaults, so an override document only lists the values
/// it changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    pub compliance: ComplianceWeights,
    /// Plan ordering within the generated alternatives.
    pub plan_selection: PlanScoringWeights,
    pub synthesis: SynthesisWeights,
    pub thresholds: ScoringThresholds,
    pub ranking: RankingWeights,
    pub comparison: ComparisonThresholds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanningTables {
    pub rulebook: ZoningRulebook,
    pub baselines: BaselineCatalog,
    pub impact_coefficients: ImpactCoefficientTable,
    pub scoring: ScoringProfile,
}

static STANDARD: Lazy<PlanningTables> = Lazy::new(|| PlanningTables {
    rulebook: ZoningRulebook::standard().clone(),
    baselines: BaselineCatalog::standard(),
    impact_coefficients: ImpactCoefficientTable::default(),
    scoring: ScoringProfile::default(),
});

impl PlanningTables {
    pub fn new(
        rulebook: ZoningRulebook,
        baselines: BaselineCatalog,
        impact_coefficients: ImpactCoefficientTable,
        scoring: ScoringProfile,
    ) -> Self {
        Self {
            rulebook,
            baselines,
            impact_coefficients,
            scoring,
        }
    }

    pub fn standard() -> &'static PlanningTables {
        &STANDARD
    }

    /// The standard tables with a different scoring profile.
    pub fn with_scoring(scoring: ScoringProfile) -> Self {
        Self {
            scoring,
            ..Self::standard().clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_use_default_scoring() {
        let tables = PlanningTables::standard();
        assert_eq!(tables.scoring, ScoringProfile::default());
        assert_eq!(tables.scoring.compliance.error_weight, 0.25);
        assert_eq!(tables.scoring.ranking.overall_impact, 0.4);
    }

    #[test]
    fn partial_profile_overrides_only_named_values() {
        let yaml = "ranking:\n  confidence: 0.3\nthresholds:\n  confidence:\n    base: 0.6\n";
        let profile: ScoringProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.ranking.confidence, 0.3);
        assert_eq!(profile.ranking.overall_impact, 0.4);
        assert_eq!(profile.thresholds.confidence.base, 0.6);
        assert_eq!(profile.thresholds.confidence.live_baseline_bonus, 0.05);
        assert_eq!(profile.synthesis, SynthesisWeights::default());
        assert_eq!(profile.plan_selection, PlanScoringWeights::default());
        assert_eq!(profile.comparison, ComparisonThresholds::default());
    }

    #[test]
    fn plan_selection_and_comparison_sections_are_overridable() {
        let yaml = "plan_selection:\n  innovation: 0.3\ncomparison:\n  eir_stormwater: 0.7\n\
                    thresholds:\n  equity:\n    pressure_relief: 0.25\n";
        let profile: ScoringProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.plan_selection.innovation, 0.3);
        assert_eq!(profile.plan_selection.compliance, 0.4);
        assert_eq!(profile.comparison.eir_stormwater, 0.7);
        assert_eq!(profile.comparison.large_development_units, 30);
        assert_eq!(profile.thresholds.equity.pressure_relief, 0.25);
    }

    #[test]
    fn with_scoring_keeps_standard_tables() {
        let scoring = ScoringProfile {
            compliance: ComplianceWeights {
                error_weight: 0.5,
                ..ComplianceWeights::default()
            },
            ..ScoringProfile::default()
        };
        let tables = PlanningTables::with_scoring(scoring);
        assert_eq!(tables.scoring.compliance.error_weight, 0.5);
        assert_eq!(tables.rulebook, PlanningTables::standard().rulebook);
        assert_eq!(tables.baselines, PlanningTables::standard().baselines);
    }
}
