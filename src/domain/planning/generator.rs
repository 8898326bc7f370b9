//! Scenario Generator - Candidate plans from a planning brief.

use serde::{Deserialize, Serialize};

use super::templates::{narrative_for, NarrativeInputs};
use super::{
    AreaProfile, DraftPlan, Feasibility, PlanOptimizer, PlanScore, PlanVariant, PlanningBrief,
    PlanningIntent, ValidatedPlan,
};
use crate::domain::foundation::{DomainError, Fraction, PlanId};
use crate::domain::tables::PlanningTables;
use crate::domain::zoning::{ConstraintValidator, ZoneType};

/// Lot size assumed for every generated plan.
pub const STANDARD_LOT_AREA_SF: f64 = 3000.0;

/// The generated plans plus generation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningAlternatives {
    pub scenario_name: String,
    pub original_query: String,
    pub area: String,
    pub area_key: String,
    pub zone: ZoneType,
    pub intent: PlanningIntent,
    /// Validated plans, best optimization score first.
    pub plans: Vec<ValidatedPlan>,
    /// Optimization scores, parallel to `plans`.
    pub plan_scores: Vec<PlanScore>,
    pub recommended_plan_id: Option<PlanId>,
    pub tradeoffs_analysis: Vec<String>,
    pub feasibility_summary: String,
    pub generation_confidence: Fraction,
    pub planning_notes: Vec<String>,
    pub zoning_opportunities: Vec<String>,
    pub regulatory_challenges: Vec<String>,
    pub community_considerations: Vec<String>,
}

/// Produces archetype plans and validates each against the area's zoning.
pub struct ScenarioGenerator<'a> {
    tables: &'a PlanningTables,
}

impl<'a> ScenarioGenerator<'a> {
    pub fn new(tables: &'a PlanningTables) -> Self {
        Self { tables }
    }

    fn validator(&self) -> ConstraintValidator<'a> {
        ConstraintValidator::new(&self.tables.rulebook)
    }

    /// Resolves the zone an area is planned under.
    ///
    /// An explicit zone code must name a zone with rules; without one the
    /// neighborhood table (and its default) decides.
    pub fn resolve_zone(&self, area: &AreaProfile) -> Result<ZoneType, DomainError> {
        let zone = match &area.zone_code {
            Some(code) => code
                .parse::<ZoneType>()
                .map_err(|_| DomainError::unresolved_area(&area.key, code.as_str()))?,
            None => self.validator().neighborhood_zoning_lookup(&area.key),
        };

        if self.tables.rulebook.rule(zone).is_none() {
            return Err(DomainError::unresolved_area(&area.key, zone.code()));
        }
        Ok(zone)
    }

    fn prepare(&self, brief: &PlanningBrief) -> Result<ZoneType, DomainError> {
        brief.validate()?;
        self.resolve_zone(&brief.area)
    }

    /// Builds the unvalidated candidate plans for a brief.
    pub fn draft_plans(&self, brief: &PlanningBrief) -> Result<Vec<DraftPlan>, DomainError> {
        let zone = self.prepare(brief)?;
        self.draft_plans_in(brief, zone)
    }

    fn draft_plans_in(
        &self,
        brief: &PlanningBrief,
        zone: ZoneType,
    ) -> Result<Vec<DraftPlan>, DomainError> {
        PlanVariant::for_intent(brief.intent)
            .into_iter()
            .map(|variant| self.draft_plan(brief, zone, variant))
            .collect()
    }

    fn draft_plan(
        &self,
        brief: &PlanningBrief,
        zone: ZoneType,
        variant: PlanVariant,
    ) -> Result<DraftPlan, DomainError> {
        let rule = self
            .tables
            .rulebook
            .rule(zone)
            .ok_or_else(|| DomainError::unresolved_area(&brief.area.key, zone.code()))?;

        let lot_area_sf = STANDARD_LOT_AREA_SF;
        let coefficients = variant.coefficients();

        let far = coefficients.far.apply(rule.max_far);
        let height_ft = coefficients.height.apply(rule.max_height_ft);
        let total_units = coefficients
            .units
            .apply(lot_area_sf, far, brief.target_metrics.units);
        let (affordable_units, affordable_pct) = coefficients.affordability.apply(
            total_units,
            rule.affordable_housing_req,
            brief.intent,
        );
        let parking_spaces = coefficients.parking.apply(
            total_units,
            brief.area.min_parking_ratio,
            brief.area.transit_access,
        );
        let ground_floor_commercial_sf = coefficients.commercial.apply(rule.ground_floor_commercial);

        let narrative = narrative_for(
            variant,
            &NarrativeInputs {
                brief,
                zone_requires_commercial: rule.ground_floor_commercial,
                total_units,
                lot_area_sf,
                max_far: rule.max_far,
                affordable_pct,
                zone_affordable_req: rule.affordable_housing_req,
            },
        );

        Ok(DraftPlan {
            plan_id: PlanId::for_area(&brief.area.area_key(), &variant.slug()),
            variant,
            name: narrative.name,
            description: narrative.description,
            zone,
            far,
            height_ft,
            total_units,
            lot_area_sf,
            affordable_units,
            affordable_pct,
            parking_spaces,
            ground_floor_commercial_sf,
            required_variances: narrative.required_variances,
            design_rationale: narrative.design_rationale,
            policy_alignment: narrative.policy_alignment,
        })
    }

    /// Drafts and validates the candidate plans, in generation order.
    pub fn generate_plans(&self, brief: &PlanningBrief) -> Result<Vec<ValidatedPlan>, DomainError> {
        let zone = self.prepare(brief)?;
        self.generate_plans_in(brief, zone)
    }

    fn generate_plans_in(
        &self,
        brief: &PlanningBrief,
        zone: ZoneType,
    ) -> Result<Vec<ValidatedPlan>, DomainError> {
        let validator = self.validator();
        let weights = self.tables.scoring.compliance;
        Ok(self
            .draft_plans_in(brief, zone)?
            .into_iter()
            .map(|draft| draft.validate(&validator, &weights))
            .collect())
    }

    /// Generates the full set of planning alternatives for a brief.
    ///
    /// Plans come back ranked by optimization score; the first is the
    /// planner's recommendation.
    pub fn generate(&self, brief: &PlanningBrief) -> Result<PlanningAlternatives, DomainError> {
        let zone = self.prepare(brief)?;
        let optimizer = PlanOptimizer::new(self.tables.scoring.plan_selection);
        let (plans, plan_scores) = optimizer.rank(self.generate_plans_in(brief, zone)?, brief);

        Ok(PlanningAlternatives {
            scenario_name: format!("{} {}", brief.area.display_name, brief.intent.title()),
            original_query: brief.original_query.clone(),
            area: brief.area.display_name.clone(),
            area_key: brief.area.area_key(),
            zone,
            intent: brief.intent,
            recommended_plan_id: plans.first().map(|plan| plan.plan_id().clone()),
            tradeoffs_analysis: optimizer.tradeoffs(&plans),
            plan_scores,
            feasibility_summary: feasibility_summary(&plans),
            generation_confidence: generation_confidence(&plans),
            planning_notes: planning_notes(&plans, brief, zone),
            zoning_opportunities: brief.opportunities.clone(),
            regulatory_challenges: brief.constraints.clone(),
            community_considerations: brief.policy_considerations.clone(),
            plans,
        })
    }
}

/// "Generated N plans: ..." with feasibility counts in first-seen order.
pub fn feasibility_summary(plans: &[ValidatedPlan]) -> String {
    if plans.is_empty() {
        return "No plans generated".to_string();
    }

    let mut counts: Vec<(Feasibility, usize)> = Vec::new();
    for plan in plans {
        match counts.iter_mut().find(|(f, _)| *f == plan.feasibility) {
            Some((_, count)) => *count += 1,
            None => counts.push((plan.feasibility, 1)),
        }
    }

    let parts = counts
        .iter()
        .map(|(feasibility, count)| format!("{} {}", count, feasibility.label()))
        .collect::<Vec<_>>();
    format!("Generated {} plans: {}", plans.len(), parts.join(", "))
}

/// Confidence in a generated plan set.
///
/// Starts at 0.8, moves with mean compliance, rewards a spread of
/// feasibility outcomes and penalizes each plan with error violations.
pub fn generation_confidence(plans: &[ValidatedPlan]) -> Fraction {
    if plans.is_empty() {
        return Fraction::ZERO;
    }

    let mean_compliance = plans
        .iter()
        .map(|p| p.compliance_score.value())
        .sum::<f64>()
        / plans.len() as f64;

    let mut confidence = 0.8 + (mean_compliance - 0.5) * 0.2;

    let first = plans[0].feasibility;
    if plans.iter().any(|p| p.feasibility != first) {
        confidence += 0.1;
    }

    let with_errors = plans.iter().filter(|p| p.has_errors()).count();
    confidence -= with_errors as f64 * 0.1;

    Fraction::new(confidence.clamp(0.1, 1.0))
}

fn planning_notes(plans: &[ValidatedPlan], brief: &PlanningBrief, zone: ZoneType) -> Vec<String> {
    let mut notes = Vec::new();

    if plans.is_empty() {
        notes.push("No feasible plans could be generated for this scenario".to_string());
        return notes;
    }

    if plans.iter().any(ValidatedPlan::has_errors) {
        notes.push("Some plans exceed zoning limits and need variances or rezoning".to_string());
    }

    notes.push(format!(
        "Analysis based on {} {} zoning",
        brief.area.display_name, zone
    ));

    if brief.constraints.len() > 2 {
        notes.push(format!(
            "Multiple constraints identified: {}",
            brief.constraints[..2].join(", ")
        ));
    }

    let mut best = &plans[0];
    for plan in &plans[1..] {
        if plan.compliance_score > best.compliance_score {
            best = plan;
        }
    }
    if best.compliance_score.value() > 0.9 {
        notes.push(format!(
            "Most compliant plan ({}) achieves high compliance with minimal variances",
            best.plan.name
        ));
    } else if best.compliance_score.value() < 0.6 {
        notes.push(
            "All scenarios require significant variances or rezoning - consider revising targets"
                .to_string(),
        );
    }

    let high_affordability = plans.iter().filter(|p| p.plan.affordable_pct > 0.25).count();
    if high_affordability > 0 {
        notes.push(format!(
            "{} plans exceed 25% affordability through innovative financing",
            high_affordability
        ));
    }

    notes
}
