//! Impact Evaluator - Scores validated plans against an area baseline.
//!
//! Each plan is evaluated independently: the five category calculations read
//! only the plan, its archetype coefficients and the resolved baseline, and
//! the synthesis reads only those five records.

use super::{ComprehensiveImpact, ImpactCategories, ResolvedBaseline};
use crate::domain::foundation::Fraction;
use crate::domain::planning::ValidatedPlan;
use crate::domain::tables::PlanningTables;

/// Stateless evaluator over a set of planning tables.
#[derive(Debug, Clone, Copy)]
pub struct ImpactEvaluator<'a> {
    tables: &'a PlanningTables,
}

impl<'a> ImpactEvaluator<'a> {
    pub fn new(tables: &'a PlanningTables) -> Self {
        Self { tables }
    }

    /// Computes the five impact categories for a plan.
    pub fn assess_categories(
        &self,
        plan: &ValidatedPlan,
        baseline: &ResolvedBaseline,
    ) -> ImpactCategories {
        let coefficients = self
            .tables
            .impact_coefficients
            .for_archetype(plan.plan.archetype());
        ImpactCategories::assess(
            &plan.plan,
            coefficients,
            &baseline.baseline,
            &self.tables.scoring.thresholds.equity,
        )
    }

    /// Confidence in one plan's estimate given where the baseline came from.
    pub fn confidence(&self, baseline: &ResolvedBaseline) -> Fraction {
        let settings = self.tables.scoring.thresholds.confidence;
        let bonus = if baseline.is_live() {
            settings.live_baseline_bonus
        } else {
            0.0
        };
        Fraction::new(settings.base + bonus)
    }

    /// Combines category records into the comprehensive impact of a plan.
    pub fn synthesize(
        &self,
        plan: &ValidatedPlan,
        categories: ImpactCategories,
        confidence: Fraction,
    ) -> ComprehensiveImpact {
        let scoring = &self.tables.scoring;
        let thresholds = &scoring.thresholds;

        ComprehensiveImpact {
            plan_id: plan.plan_id().clone(),
            plan_name: plan.plan.name.clone(),
            archetype: plan.plan.archetype(),
            feasibility: plan.feasibility,
            overall_impact_score: categories.overall_score(&scoring.synthesis),
            confidence_level: confidence,
            key_benefits: categories.key_benefits(&thresholds.benefits),
            key_concerns: categories.key_concerns(&thresholds.concerns),
            mitigation_strategies: categories.mitigation_strategies(&thresholds.mitigations),
            categories,
        }
    }

    pub fn evaluate_plan(
        &self,
        plan: &ValidatedPlan,
        baseline: &ResolvedBaseline,
    ) -> ComprehensiveImpact {
        let categories = self.assess_categories(plan, baseline);
        self.synthesize(plan, categories, self.confidence(baseline))
    }

    /// Evaluates every plan, preserving input order.
    pub fn evaluate(
        &self,
        plans: &[ValidatedPlan],
        baseline: &ResolvedBaseline,
    ) -> Vec<ComprehensiveImpact> {
        plans
            .iter()
            .map(|plan| self.evaluate_plan(plan, baseline))
            .collect()
    }
}
