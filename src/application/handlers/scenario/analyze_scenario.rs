//! AnalyzeScenarioHandler - Runs the full planning pipeline for one brief.
//!
//! 1. Generates and validates candidate plans (terminal error if the area's
//!    zoning cannot be resolved)
//! 2. Fetches the area baseline, degrading to static values on any failure
//! 3. Evaluates every plan's impacts
//! 4. Ranks the plans and builds the comparison

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::analysis::{ComparativeAnalyzer, ScenarioComparison};
use crate::domain::foundation::{AnalysisId, DomainError, Timestamp};
use crate::domain::impact::{BaselineSource, ImpactEvaluator, ResolvedBaseline};
use crate::domain::planning::{PlanningAlternatives, PlanningBrief, ScenarioGenerator};
use crate::domain::tables::PlanningTables;
use crate::ports::BaselineProvider;

/// Command to analyze one planning brief.
#[derive(Debug, Clone)]
pub struct AnalyzeScenarioCommand {
    pub brief: PlanningBrief,
}

/// Output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    pub analysis_id: AnalysisId,
    pub generated_at: Timestamp,
    pub baseline_source: BaselineSource,
    pub alternatives: PlanningAlternatives,
    pub comparison: ScenarioComparison,
}

/// Handler for scenario analysis.
pub struct AnalyzeScenarioHandler {
    tables: Arc<PlanningTables>,
    baseline_provider: Arc<dyn BaselineProvider>,
}

impl AnalyzeScenarioHandler {
    pub fn new(tables: Arc<PlanningTables>, baseline_provider: Arc<dyn BaselineProvider>) -> Self {
        Self {
            tables,
            baseline_provider,
        }
    }

    pub async fn handle(&self, cmd: AnalyzeScenarioCommand) -> Result<ScenarioAnalysis, DomainError> {
        let analysis_id = AnalysisId::new();
        let brief = cmd.brief;

        let alternatives = ScenarioGenerator::new(&self.tables)
            .generate(&brief)
            .map_err(|err| {
                warn!(
                    analysis_id = %analysis_id,
                    area = %brief.area.key,
                    error = %err,
                    "Scenario generation failed"
                );
                err
            })?;

        let baseline = self.resolve_baseline(&alternatives.area_key).await;

        for plan in &alternatives.plans {
            debug!(
                analysis_id = %analysis_id,
                plan_id = %plan.plan_id(),
                feasibility = %plan.feasibility,
                units = plan.plan.total_units,
                compliance = plan.compliance_score.value(),
                "Validated plan"
            );
        }

        let impacts = ImpactEvaluator::new(&self.tables).evaluate(&alternatives.plans, &baseline);
        let comparison = ComparativeAnalyzer::compare(
            &alternatives,
            impacts,
            &baseline,
            &self.tables.scoring.ranking,
            &self.tables.scoring.comparison,
        );

        info!(
            analysis_id = %analysis_id,
            area = %alternatives.area_key,
            zone = %alternatives.zone,
            plans = alternatives.plans.len(),
            recommended = comparison
                .recommended_plan_id
                .as_ref()
                .map(|id| id.as_str())
                .unwrap_or("none"),
            live_baseline = baseline.is_live(),
            "Scenario analysis complete"
        );

        Ok(ScenarioAnalysis {
            analysis_id,
            generated_at: Timestamp::now(),
            baseline_source: baseline.source,
            alternatives,
            comparison,
        })
    }

    /// Fetches the live part of the baseline. Errors never escape.
    async fn resolve_baseline(&self, area_key: &str) -> ResolvedBaseline {
        let catalog = &self.tables.baselines;
        match self.baseline_provider.fetch(area_key).await {
            Ok(snapshot) => catalog.resolve(area_key, snapshot),
            Err(err) => {
                warn!(
                    area = area_key,
                    provider = self.baseline_provider.name(),
                    error = %err,
                    "Baseline unavailable, using static values"
                );
                catalog.resolve_static(area_key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::baseline::{MockBaselineProvider, StaticBaselineProvider};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::planning::{AreaProfile, PlanningIntent};
    use crate::ports::BaselineError;

    fn handler(provider: MockBaselineProvider) -> AnalyzeScenarioHandler {
        AnalyzeScenarioHandler::new(
            Arc::new(PlanningTables::standard().clone()),
            Arc::new(provider),
        )
    }

    fn mission_brief(intent: PlanningIntent) -> AnalyzeScenarioCommand {
        AnalyzeScenarioCommand {
            brief: PlanningBrief::new(AreaProfile::new("mission", "Mission District"), intent)
                .with_target_units(20),
        }
    }

    #[tokio::test]
    async fn live_baseline_flows_into_comparison() {
        let result = handler(MockBaselineProvider::live(4200))
            .handle(mission_brief(PlanningIntent::AntiDisplacement))
            .await
            .unwrap();

        assert_eq!(result.baseline_source, BaselineSource::Live);
        assert_eq!(result.alternatives.plans.len(), 4);
        assert_eq!(result.comparison.plan_impacts.len(), 4);
        assert_eq!(result.comparison.cumulative_housing_impact.current_units, 4200);
        assert!((result.comparison.analysis_confidence.value() - 0.80).abs() < 1e-9);
        assert_eq!(result.comparison.data_completeness.value(), 0.90);
    }

    #[tokio::test]
    async fn recommended_plan_is_one_of_the_generated_plans() {
        let result = handler(MockBaselineProvider::live(4200))
            .handle(mission_brief(PlanningIntent::HousingDevelopment))
            .await
            .unwrap();

        let recommended = result.comparison.recommended_plan_id.clone().unwrap();
        assert!(result
            .alternatives
            .plans
            .iter()
            .any(|plan| plan.plan_id() == &recommended));
        assert!(result.comparison.recommended_impact().is_some());
    }

    #[tokio::test]
    async fn failing_provider_degrades_to_static_baseline() {
        let provider = MockBaselineProvider::failing(BaselineError::unavailable("connection refused"));
        let result = handler(provider.clone())
            .handle(mission_brief(PlanningIntent::HousingDevelopment))
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(result.baseline_source, BaselineSource::Static);
        assert_eq!(result.comparison.cumulative_housing_impact.current_units, 1000);
        assert_eq!(result.comparison.analysis_confidence.value(), 0.75);
    }

    #[tokio::test]
    async fn unresolved_zone_fails_before_baseline_fetch() {
        let provider = MockBaselineProvider::live(4200);
        let mut cmd = mission_brief(PlanningIntent::HousingDevelopment);
        cmd.brief.area.zone_code = Some("PDR-1".to_string());

        let err = handler(provider.clone()).handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UnresolvedArea);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn static_provider_runs_end_to_end() {
        let handler = AnalyzeScenarioHandler::new(
            Arc::new(PlanningTables::standard().clone()),
            Arc::new(StaticBaselineProvider::default()),
        );
        let cmd = AnalyzeScenarioCommand {
            brief: PlanningBrief::new(
                AreaProfile::new("hayes_valley", "Hayes Valley"),
                PlanningIntent::WalkabilityImprovement,
            ),
        };
        let result = handler.handle(cmd).await.unwrap();

        assert_eq!(result.comparison.scenario_name, "Hayes Valley Walkability Improvement Impact Analysis");
        assert_eq!(result.comparison.baseline_description, "Current conditions in Hayes Valley");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["comparison"]["plan_impacts"].is_array());
    }
}
