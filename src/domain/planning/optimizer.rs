//! Plan Optimizer - Orders candidate plans by fit to the brief.
//!
//! A plan's score blends four terms: zoning compliance, closeness to the
//! brief's targets, alignment with the planning intent and design
//! innovation. Plans are ordered best first; equal scores keep generation
//! order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{
    Archetype, DraftPlan, InnovativeFocus, PlanVariant, PlanningBrief, PlanningIntent,
    TargetMetrics, ValidatedPlan,
};
use crate::domain::foundation::{Fraction, PlanId};

/// Weights of the plan score and the cut-offs of planner tradeoff lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanScoringWeights {
    pub compliance: f64,
    pub target_achievement: f64,
    pub policy_alignment: f64,
    pub innovation: f64,
    /// Share of target achievement given to height, FAR and parking
    /// targets when the brief sets any of them.
    pub form_target_share: f64,
    /// Compliance spread above which a tradeoff line is emitted.
    pub compliance_spread: f64,
    /// Parking-per-unit spread above which a tradeoff line is emitted.
    pub parking_ratio_spread: f64,
}

impl Default for PlanScoringWeights {
    fn default() -> Self {
        Self {
            compliance: 0.4,
            target_achievement: 0.3,
            policy_alignment: 0.2,
            innovation: 0.1,
            form_target_share: 0.2,
            compliance_spread: 0.1,
            parking_ratio_spread: 0.2,
        }
    }
}

/// Optimization score of one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanScore {
    pub plan_id: PlanId,
    pub score: Fraction,
}

#[derive(Debug, Clone, Copy)]
pub struct PlanOptimizer {
    weights: PlanScoringWeights,
}

impl PlanOptimizer {
    pub fn new(weights: PlanScoringWeights) -> Self {
        Self { weights }
    }

    /// How closely a plan meets the brief's targets, in [0, 1].
    ///
    /// Units and affordability make up the base term. Height and FAR targets
    /// act as ceilings and parking as a count to match; when any of them is
    /// set, their mean closeness takes `form_target_share` of the result.
    pub fn target_achievement(&self, plan: &DraftPlan, targets: &TargetMetrics) -> f64 {
        let units = match targets.units.filter(|&target| target > 0) {
            Some(target) => {
                let ratio = f64::from(plan.total_units) / f64::from(target);
                let closeness = if ratio <= 1.0 { ratio } else { 1.0 / ratio };
                closeness * 0.5
            }
            None => 0.5,
        };
        let affordability = match targets.affordability_pct.filter(|&target| target > 0.0) {
            Some(target) => (plan.affordable_pct / target).min(1.0) * 0.5,
            None => (plan.affordable_pct * 2.0).min(0.5),
        };
        let base = (units + affordability).min(1.0);

        match form_closeness(plan, targets) {
            Some(form) => {
                let share = self.weights.form_target_share.clamp(0.0, 1.0);
                base * (1.0 - share) + form * share
            }
            None => base,
        }
    }

    /// How well a plan serves the planning intent, in [0, 1].
    pub fn policy_alignment(plan: &DraftPlan, intent: PlanningIntent) -> f64 {
        let units = f64::from(plan.total_units);
        let parking = f64::from(plan.parking_spaces);
        let innovative = plan.archetype() == Archetype::Innovative;

        let score = match intent {
            PlanningIntent::HousingDevelopment => {
                (units / 30.0).min(0.5) + (plan.affordable_pct * 2.0).min(0.5)
            }
            PlanningIntent::AntiDisplacement => {
                let community = if innovative { 0.3 } else { 0.0 };
                (plan.affordable_pct * 2.5).min(0.7) + community
            }
            PlanningIntent::ClimateResilience => {
                let mut score = 0.2;
                if plan.variant == PlanVariant::Innovative(InnovativeFocus::Climate) {
                    score += 0.5;
                }
                if innovative {
                    score += 0.3;
                }
                score
            }
            PlanningIntent::WalkabilityImprovement => {
                let mut score = 0.3;
                if plan.ground_floor_commercial_sf > 1000 {
                    score += 0.4;
                }
                if parking < units * 0.5 {
                    score += 0.3;
                }
                score
            }
            PlanningIntent::TransitImprovement => {
                let reduced_parking = if parking < units * 0.7 { 0.4 } else { 0.0 };
                reduced_parking + (units / 25.0).min(0.6)
            }
            PlanningIntent::MixedUseDevelopment => 0.5,
        };
        score.min(1.0)
    }

    /// Design innovation, in [0, 1].
    pub fn innovation(plan: &DraftPlan) -> f64 {
        let base = match plan.archetype() {
            Archetype::Innovative => 0.6,
            Archetype::Aggressive => 0.4,
            Archetype::Moderate => 0.2,
            Archetype::Conservative => 0.0,
        };

        let distinct: HashSet<&str> = plan.design_rationale.iter().map(String::as_str).collect();
        let rationale = (distinct.len() as f64 / 10.0).min(0.3);

        let variances = if plan.required_variances.is_empty() {
            0.0
        } else {
            (plan.required_variances.len() as f64 / 5.0).min(0.1)
        };

        (base + rationale + variances).min(1.0)
    }

    pub fn score(&self, plan: &ValidatedPlan, brief: &PlanningBrief) -> Fraction {
        let weights = &self.weights;
        let score = plan.compliance_score.value() * weights.compliance
            + self.target_achievement(&plan.plan, &brief.target_metrics) * weights.target_achievement
            + Self::policy_alignment(&plan.plan, brief.intent) * weights.policy_alignment
            + Self::innovation(&plan.plan) * weights.innovation;
        Fraction::new(score.min(1.0))
    }

    /// Orders plans best first. Equal scores keep their input order.
    pub fn rank(
        &self,
        plans: Vec<ValidatedPlan>,
        brief: &PlanningBrief,
    ) -> (Vec<ValidatedPlan>, Vec<PlanScore>) {
        let mut scored: Vec<(ValidatedPlan, Fraction)> = plans
            .into_iter()
            .map(|plan| {
                let score = self.score(&plan, brief);
                (plan, score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()));

        scored
            .into_iter()
            .map(|(plan, score)| {
                let entry = PlanScore {
                    plan_id: plan.plan_id().clone(),
                    score,
                };
                (plan, entry)
            })
            .unzip()
    }

    /// Design tradeoffs visible across the plan set. Empty for no plans.
    pub fn tradeoffs(&self, plans: &[ValidatedPlan]) -> Vec<String> {
        let mut tradeoffs = Vec::new();

        let units = plans.iter().map(|p| p.plan.total_units);
        if let (Some(min), Some(max)) = (units.clone().min(), units.max()) {
            if max > min {
                tradeoffs.push(format!(
                    "Unit count ranges from {} to {} - higher density requires more variances",
                    min, max
                ));
            }
        }

        let affordable = plans
            .iter()
            .map(|p| p.plan.affordable_pct)
            .filter(|&pct| pct > 0.0);
        if let Some((min, max)) = min_max(affordable) {
            if max > min {
                tradeoffs.push(format!(
                    "Affordability ranges from {:.0}% to {:.0}% - higher affordability may need subsidies",
                    min * 100.0,
                    max * 100.0
                ));
            }
        }

        if let Some((min, max)) = min_max(plans.iter().map(|p| p.compliance_score.value())) {
            if max > min + self.weights.compliance_spread {
                tradeoffs.push(format!(
                    "Compliance varies from {:.0}% to {:.0}% - high compliance limits development potential",
                    min * 100.0,
                    max * 100.0
                ));
            }
        }

        let archetypes: HashSet<Archetype> = plans.iter().map(|p| p.plan.archetype()).collect();
        if archetypes.len() > 2 {
            tradeoffs.push(
                "Conservative plans ensure approval but limit impact; innovative plans maximize benefits but increase risk"
                    .to_string(),
            );
        }

        let parking_ratios = plans
            .iter()
            .filter(|p| p.plan.total_units > 0)
            .map(|p| f64::from(p.plan.parking_spaces) / f64::from(p.plan.total_units));
        if let Some((min, max)) = min_max(parking_ratios) {
            if max > min + self.weights.parking_ratio_spread {
                tradeoffs.push(
                    "Lower parking supports walkability but may require variances and face community resistance"
                        .to_string(),
                );
            }
        }

        tradeoffs
    }
}

/// Mean closeness to the height, FAR and parking targets that are set.
fn form_closeness(plan: &DraftPlan, targets: &TargetMetrics) -> Option<f64> {
    let mut parts = Vec::new();
    if let Some(height) = targets.height_ft {
        parts.push(ceiling_closeness(f64::from(plan.height_ft), f64::from(height)));
    }
    if let Some(far) = targets.far {
        parts.push(ceiling_closeness(plan.far, far));
    }
    if let Some(parking) = targets.parking_spaces {
        let (low, high) = if plan.parking_spaces <= parking {
            (plan.parking_spaces, parking)
        } else {
            (parking, plan.parking_spaces)
        };
        parts.push(if high == 0 {
            1.0
        } else {
            f64::from(low) / f64::from(high)
        });
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.iter().sum::<f64>() / parts.len() as f64)
}

/// 1 at or under the ceiling, falling off as `ceiling / actual` above it.
fn ceiling_closeness(actual: f64, ceiling: f64) -> f64 {
    if actual <= ceiling {
        1.0
    } else {
        ceiling / actual
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
