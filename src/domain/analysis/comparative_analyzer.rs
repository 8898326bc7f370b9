//! Comparative Analyzer - Ranking, recommendation and implementation guidance.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Fraction, PlanId};
use crate::domain::impact::{ComprehensiveImpact, EquityImpact, HousingImpact, ResolvedBaseline};
use crate::domain::planning::{Feasibility, PlanningAlternatives};

/// Weights of the plan ranking score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub overall_impact: f64,
    pub affordability: f64,
    pub community_benefit: f64,
    pub confidence: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            overall_impact: 0.4,
            affordability: 0.25,
            community_benefit: 0.2,
            confidence: 0.15,
        }
    }
}

impl RankingWeights {
    pub fn score(&self, impact: &ComprehensiveImpact) -> f64 {
        impact.overall_impact_score * self.overall_impact
            + impact.housing().affordability_improvement / 100.0 * self.affordability
            + impact.equity().community_benefit_score.value() * self.community_benefit
            + impact.confidence_level.value() * self.confidence
    }
}

/// Cut-offs behind tradeoff and implementation guidance lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonThresholds {
    /// Unit count above which construction is phased.
    pub phased_construction_units: u32,
    /// Unit count above which a plan is a large development.
    pub large_development_units: u32,
    pub high_community_benefit: f64,
    pub strong_overall_impact: f64,
    pub high_displacement_risk: f64,
    pub tradeoff_displacement_risk: f64,
    /// Property value change, in percent.
    pub tradeoff_property_change: f64,
    pub tradeoff_min_community_benefit: f64,
    pub tradeoff_min_resilience: f64,
    /// Stormwater score above which an EIR is likely.
    pub eir_stormwater: f64,
    pub inclusionary_compliance_units: u32,
}

impl Default for ComparisonThresholds {
    fn default() -> Self {
        Self {
            phased_construction_units: 50,
            large_development_units: 30,
            high_community_benefit: 0.7,
            strong_overall_impact: 0.5,
            high_displacement_risk: 0.5,
            tradeoff_displacement_risk: 0.3,
            tradeoff_property_change: 5.0,
            tradeoff_min_community_benefit: 0.5,
            tradeoff_min_resilience: 0.6,
            eir_stormwater: 0.6,
            inclusionary_compliance_units: 10,
        }
    }
}

/// Side-by-side evaluation of all plans with a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenario_name: String,
    pub baseline_description: String,
    pub plan_impacts: Vec<ComprehensiveImpact>,
    pub recommended_plan_id: Option<PlanId>,
    pub comparison_rationale: String,
    pub tradeoff_analysis: Vec<String>,
    /// Housing impact of the plan adding the most units.
    pub cumulative_housing_impact: HousingImpact,
    /// Equity impact of the plan with the highest community benefit.
    pub cumulative_equity_impact: EquityImpact,
    pub phasing_recommendations: Vec<String>,
    pub policy_requirements: Vec<String>,
    pub community_engagement_needs: Vec<String>,
    pub analysis_confidence: Fraction,
    pub data_completeness: Fraction,
}

impl ScenarioComparison {
    pub fn recommended_impact(&self) -> Option<&ComprehensiveImpact> {
        let id = self.recommended_plan_id.as_ref()?;
        self.plan_impacts.iter().find(|impact| &impact.plan_id == id)
    }
}

/// First element with the strictly highest key.
fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}

/// Stateless comparison over a set of evaluated plans.
pub struct ComparativeAnalyzer;

impl ComparativeAnalyzer {
    /// Highest-ranked plan; ties go to the earliest plan.
    pub fn rank_and_recommend(
        impacts: &[ComprehensiveImpact],
        weights: &RankingWeights,
    ) -> Option<PlanId> {
        first_max_by(impacts, |impact| weights.score(impact)).map(|impact| impact.plan_id.clone())
    }

    /// Housing impact of the largest plan, zeroed when there are no plans.
    pub fn cumulative_housing(impacts: &[ComprehensiveImpact]) -> HousingImpact {
        first_max_by(impacts, |impact| f64::from(impact.housing().net_new_units))
            .map(|impact| impact.housing().clone())
            .unwrap_or_else(HousingImpact::zeroed)
    }

    /// Equity impact of the most beneficial plan, neutral when there are no plans.
    pub fn cumulative_equity(impacts: &[ComprehensiveImpact]) -> EquityImpact {
        first_max_by(impacts, |impact| impact.equity().community_benefit_score.value())
            .map(|impact| impact.equity().clone())
            .unwrap_or_else(EquityImpact::neutral)
    }

    pub fn tradeoff_analysis(
        impacts: &[ComprehensiveImpact],
        thresholds: &ComparisonThresholds,
    ) -> Vec<String> {
        if impacts.len() < 2 {
            return vec!["Insufficient plans for tradeoff analysis".to_string()];
        }

        let max_units = impacts
            .iter()
            .map(|impact| impact.housing().net_new_units)
            .max()
            .unwrap_or(0);
        let max_displacement = impacts
            .iter()
            .map(|impact| impact.housing().displacement_risk_score)
            .fold(Fraction::ZERO, |a, b| if b.value() > a.value() { b } else { a });
        let max_property = impacts
            .iter()
            .map(|impact| impact.economic().property_value_change_percentage)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_benefit = impacts
            .iter()
            .map(|impact| impact.equity().community_benefit_score.value())
            .fold(f64::INFINITY, f64::min);
        let min_resilience = impacts
            .iter()
            .map(|impact| impact.environmental().climate_resilience_score.value())
            .fold(f64::INFINITY, f64::min);

        let mut tradeoffs = Vec::new();
        if max_units > 0 && max_displacement.value() > thresholds.tradeoff_displacement_risk {
            tradeoffs.push(format!(
                "Higher unit counts (up to {}) correlate with increased displacement risk (up to {})",
                max_units, max_displacement
            ));
        }
        if max_property > thresholds.tradeoff_property_change
            && min_benefit < thresholds.tradeoff_min_community_benefit
        {
            tradeoffs.push(
                "Plans with higher property value increases may have lower community benefit scores"
                    .to_string(),
            );
        }
        if max_units > thresholds.large_development_units
            && min_resilience < thresholds.tradeoff_min_resilience
        {
            tradeoffs
                .push("Higher density development may compromise environmental performance".to_string());
        }

        if tradeoffs.is_empty() {
            tradeoffs.push("Plans show complementary rather than competing benefits".to_string());
        }
        tradeoffs
    }

    pub fn comparison_rationale(
        recommended: Option<&ComprehensiveImpact>,
        thresholds: &ComparisonThresholds,
    ) -> String {
        let Some(plan) = recommended else {
            return "Unable to determine optimal plan".to_string();
        };

        let mut parts = Vec::new();
        if plan.housing().affordable_units_added > 0 {
            parts.push(format!(
                "provides {} affordable units",
                plan.housing().affordable_units_added
            ));
        }
        if plan.equity().community_benefit_score.value() > thresholds.high_community_benefit {
            parts.push("maximizes community benefits".to_string());
        }
        if plan.overall_impact_score > thresholds.strong_overall_impact {
            parts.push("achieves strong overall positive impact".to_string());
        }

        if parts.is_empty() {
            return "Recommended plan offers the strongest weighted balance of impacts while maintaining feasibility"
                .to_string();
        }
        format!(
            "Recommended plan {} while maintaining feasibility",
            parts.join(" and ")
        )
    }

    pub fn phasing_recommendations(
        recommended: Option<&ComprehensiveImpact>,
        thresholds: &ComparisonThresholds,
    ) -> Vec<String> {
        let Some(plan) = recommended else {
            return vec!["Unable to generate phasing recommendations".to_string()];
        };

        let mut phases =
            vec!["Phase 1: Community engagement and environmental review (6-12 months)".to_string()];
        if plan.housing().net_new_units > thresholds.phased_construction_units {
            phases.push(
                "Phase 2: Phased construction to minimize community disruption (18-36 months)"
                    .to_string(),
            );
        } else {
            phases.push("Phase 2: Construction and development (12-18 months)".to_string());
        }
        if plan.equity().community_benefit_score.value() > thresholds.high_community_benefit {
            phases.push(
                "Phase 3: Community integration and benefit realization (6-12 months)".to_string(),
            );
        }
        phases
    }

    pub fn policy_requirements(
        recommended: Option<&ComprehensiveImpact>,
        thresholds: &ComparisonThresholds,
    ) -> Vec<String> {
        let mut policies = Vec::new();

        if let Some(plan) = recommended {
            if matches!(
                plan.feasibility,
                Feasibility::RequiresVariances | Feasibility::NeedsRezoning
            ) {
                policies.push("Zoning variances or conditional use permits required".to_string());
            }
            if plan.environmental().stormwater_impact_score.value() > thresholds.eir_stormwater {
                policies.push("Environmental Impact Report (EIR) likely required".to_string());
            }
            if plan.housing().affordable_units_added > thresholds.inclusionary_compliance_units {
                policies.push("Compliance with inclusionary housing requirements".to_string());
            }
        }

        if policies.is_empty() {
            policies.push("Standard planning approvals sufficient".to_string());
        }
        policies
    }

    pub fn community_engagement_needs(
        recommended: Option<&ComprehensiveImpact>,
        thresholds: &ComparisonThresholds,
    ) -> Vec<String> {
        let mut needs = Vec::new();

        if let Some(plan) = recommended {
            if plan.housing().displacement_risk_score.value() > thresholds.high_displacement_risk {
                needs.push("Extensive tenant protection and relocation assistance planning".to_string());
            }
            if plan.housing().net_new_units > thresholds.large_development_units {
                needs.push("Neighborhood design review and community input sessions".to_string());
            }
            if plan.equity().community_benefit_score.value() > thresholds.high_community_benefit {
                needs.push("Community benefit agreement negotiations".to_string());
            }
        }

        if needs.is_empty() {
            needs.push("Standard community notification process".to_string());
        }
        needs
    }

    /// Mean per-plan confidence, 0.5 when there are no plans.
    pub fn analysis_confidence(impacts: &[ComprehensiveImpact]) -> Fraction {
        if impacts.is_empty() {
            return Fraction::new(0.5);
        }
        let total: f64 = impacts.iter().map(|impact| impact.confidence_level.value()).sum();
        Fraction::new(total / impacts.len() as f64)
    }

    /// Builds the full comparison for a set of evaluated alternatives.
    pub fn compare(
        alternatives: &PlanningAlternatives,
        impacts: Vec<ComprehensiveImpact>,
        baseline: &ResolvedBaseline,
        weights: &RankingWeights,
        thresholds: &ComparisonThresholds,
    ) -> ScenarioComparison {
        let recommended_plan_id = Self::rank_and_recommend(&impacts, weights);
        let recommended = recommended_plan_id
            .as_ref()
            .and_then(|id| impacts.iter().find(|impact| &impact.plan_id == id));

        ScenarioComparison {
            scenario_name: format!("{} Impact Analysis", alternatives.scenario_name),
            baseline_description: format!("Current conditions in {}", alternatives.area),
            comparison_rationale: Self::comparison_rationale(recommended, thresholds),
            tradeoff_analysis: Self::tradeoff_analysis(&impacts, thresholds),
            cumulative_housing_impact: Self::cumulative_housing(&impacts),
            cumulative_equity_impact: Self::cumulative_equity(&impacts),
            phasing_recommendations: Self::phasing_recommendations(recommended, thresholds),
            policy_requirements: Self::policy_requirements(recommended, thresholds),
            community_engagement_needs: Self::community_engagement_needs(recommended, thresholds),
            analysis_confidence: Self::analysis_confidence(&impacts),
            data_completeness: Fraction::new(baseline.baseline.data_completeness),
            recommended_plan_id,
            plan_impacts: impacts,
        }
    }
}
