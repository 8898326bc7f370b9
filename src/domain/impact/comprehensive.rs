//! Comprehensive Impact - The five category records for one plan and their synthesis.

use serde::{Deserialize, Serialize};

use super::{
    AccessibilityImpact, AreaBaseline, BenefitThresholds, ConcernThresholds, EconomicImpact,
    EnvironmentalImpact, EquityImpact, EquityThresholds, HousingImpact, ImpactCoefficients,
    MitigationThresholds, SynthesisWeights,
};
use crate::domain::foundation::{Fraction, PlanId};
use crate::domain::planning::{Archetype, DraftPlan, Feasibility};

/// Independent per-category impacts of one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactCategories {
    pub housing: HousingImpact,
    pub accessibility: AccessibilityImpact,
    pub equity: EquityImpact,
    pub economic: EconomicImpact,
    pub environmental: EnvironmentalImpact,
}

impl ImpactCategories {
    /// Computes every category for a plan. Categories do not read each other.
    pub fn assess(
        plan: &DraftPlan,
        coefficients: &ImpactCoefficients,
        baseline: &AreaBaseline,
        equity: &EquityThresholds,
    ) -> Self {
        Self {
            housing: HousingImpact::assess(plan, coefficients, baseline),
            accessibility: AccessibilityImpact::assess(plan, coefficients, baseline),
            equity: EquityImpact::assess(plan, coefficients, baseline, equity),
            economic: EconomicImpact::assess(plan, coefficients, baseline),
            environmental: EnvironmentalImpact::assess(plan, coefficients, baseline),
        }
    }

    /// Weighted sum of the normalized category terms, clamped to [-1, 1].
    pub fn overall_score(&self, weights: &SynthesisWeights) -> f64 {
        let housing = self.housing.affordability_improvement / 100.0;
        let accessibility = self.accessibility.walk_score_change / 10.0;
        let equity = self.equity.community_benefit_score.value();
        let economic = (self.economic.property_value_change_percentage / 10.0).min(weights.economic_cap);
        let environmental = self.environmental.climate_resilience_score.value();

        let score = housing * weights.housing
            + accessibility * weights.accessibility
            + equity * weights.equity
            + economic * weights.economic
            + environmental * weights.environmental;
        score.clamp(-1.0, 1.0)
    }

    pub fn key_benefits(&self, thresholds: &BenefitThresholds) -> Vec<String> {
        let mut benefits = Vec::new();

        if self.housing.net_new_units > thresholds.new_units {
            benefits.push(format!(
                "Adds {} housing units to neighborhood",
                self.housing.net_new_units
            ));
        }
        if self.housing.affordable_units_added > 0 {
            benefits.push(format!(
                "Includes {} affordable units",
                self.housing.affordable_units_added
            ));
        }
        if self.accessibility.walk_score_change > 0.0 {
            benefits.push(format!(
                "Improves walkability by {:.1} points",
                self.accessibility.walk_score_change
            ));
        }
        if self.economic.permanent_jobs_created > 0 {
            benefits.push(format!(
                "Creates {} permanent jobs",
                self.economic.permanent_jobs_created
            ));
        }
        if self.economic.construction_jobs_created > thresholds.construction_jobs {
            benefits.push(format!(
                "Creates {} construction jobs",
                self.economic.construction_jobs_created
            ));
        }

        if benefits.is_empty() {
            benefits.push("Provides new housing opportunities in transit-rich area".to_string());
        }
        benefits
    }

    pub fn key_concerns(&self, thresholds: &ConcernThresholds) -> Vec<String> {
        let mut concerns = Vec::new();

        if self.housing.displacement_risk_score.value() > thresholds.displacement_risk {
            concerns.push(format!(
                "Moderate displacement risk ({})",
                self.housing.displacement_risk_score
            ));
        }
        if self.equity.gentrification_pressure_change > thresholds.gentrification_change {
            concerns.push("May accelerate gentrification pressures".to_string());
        }
        if self.environmental.stormwater_impact_score.value() > thresholds.stormwater {
            concerns.push("Increases flood risk and stormwater management burden".to_string());
        }
        if self.accessibility.traffic_impact_score.value() > thresholds.traffic {
            concerns.push("May increase local traffic congestion".to_string());
        }
        if self.economic.cost_per_unit > thresholds.cost_per_unit {
            concerns.push(format!(
                "High development cost per unit ({})",
                format_dollars(self.economic.cost_per_unit)
            ));
        }

        if concerns.is_empty() {
            concerns.push("Standard development review and approval process required".to_string());
        }
        concerns
    }

    pub fn mitigation_strategies(&self, thresholds: &MitigationThresholds) -> Vec<String> {
        let displacement = self.housing.displacement_risk_score.value();
        let mut strategies = Vec::new();

        if displacement > thresholds.severe_displacement_risk {
            strategies.push("Implement right of first refusal for existing tenants".to_string());
        }
        if displacement > thresholds.displacement_risk {
            strategies.push("Include community land trust opportunities".to_string());
        }
        if self.environmental.stormwater_impact_score.value() > thresholds.stormwater {
            strategies.push("Include green infrastructure and stormwater management".to_string());
        }
        if self.accessibility.traffic_impact_score.value() > thresholds.traffic {
            strategies.push("Encourage transit use and limit parking provision".to_string());
        }
        if self.economic.cost_per_unit > thresholds.cost_per_unit {
            strategies.push("Explore value capture and inclusionary zoning".to_string());
        }

        if strategies.is_empty() {
            strategies.push("Follow standard community engagement and approval processes".to_string());
            strategies.push("Monitor and evaluate project impacts during implementation".to_string());
        }
        strategies
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$550,000`.
pub fn format_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Synthesized impact record for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveImpact {
    pub plan_id: PlanId,
    pub plan_name: String,
    pub archetype: Archetype,
    pub feasibility: Feasibility,
    #[serde(flatten)]
    pub categories: ImpactCategories,
    /// Weighted synthesis in [-1, 1].
    pub overall_impact_score: f64,
    pub confidence_level: Fraction,
    pub key_benefits: Vec<String>,
    pub key_concerns: Vec<String>,
    pub mitigation_strategies: Vec<String>,
}

impl ComprehensiveImpact {
    pub fn housing(&self) -> &HousingImpact {
        &self.categories.housing
    }

    pub fn accessibility(&self) -> &AccessibilityImpact {
        &self.categories.accessibility
    }

    pub fn equity(&self) -> &EquityImpact {
        &self.categories.equity
    }

    pub fn economic(&self) -> &EconomicImpact {
        &self.categories.economic
    }

    pub fn environmental(&self) -> &EnvironmentalImpact {
        &self.categories.environmental
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::impact::{BaselineCatalog, ImpactCoefficientTable, ScoringThresholds};
    use crate::domain::test_support::draft_plan;

    fn categories(plan: &DraftPlan, baseline: &AreaBaseline) -> ImpactCategories {
        ImpactCategories::assess(
            plan,
            ImpactCoefficientTable::default().for_archetype(plan.archetype()),
            baseline,
            &EquityThresholds::default(),
        )
    }

    fn mission() -> AreaBaseline {
        BaselineCatalog::standard().lookup("mission").clone()
    }

    #[test]
    fn overall_score_weights_each_category() {
        let impacts = categories(&draft_plan(Archetype::Innovative, 20, 8, 0.40), &mission());
        // 0.4*0.30 + 0.3*0.20 + 1.0*0.25 + 0.02*0.15 + 0.9*0.10
        let score = impacts.overall_score(&SynthesisWeights::default());
        assert!((score - 0.523).abs() < 1e-9);
    }

    #[test]
    fn overall_score_is_deterministic() {
        let plan = draft_plan(Archetype::Aggressive, 21, 3, 0.15);
        let weights = SynthesisWeights::default();
        let first = categories(&plan, &mission()).overall_score(&weights);
        let second = categories(&plan, &mission()).overall_score(&weights);
        assert_eq!(first, second);
    }

    #[test]
    fn economic_term_is_capped() {
        let impacts = categories(&draft_plan(Archetype::Aggressive, 1000, 0, 0.0), &mission());
        let weights = SynthesisWeights {
            housing: 0.0,
            accessibility: 0.0,
            equity: 0.0,
            economic: 1.0,
            environmental: 0.0,
            economic_cap: 0.5,
        };
        assert_eq!(impacts.overall_score(&weights), 0.5);
    }

    #[test]
    fn innovative_plan_lists_expected_lines() {
        let impacts = categories(&draft_plan(Archetype::Innovative, 20, 8, 0.40), &mission());
        let thresholds = ScoringThresholds::default();

        assert_eq!(
            impacts.key_benefits(&thresholds.benefits),
            vec![
                "Adds 20 housing units to neighborhood",
                "Includes 8 affordable units",
                "Improves walkability by 3.0 points",
                "Creates 40 construction jobs",
            ]
        );
        assert_eq!(
            impacts.key_concerns(&thresholds.concerns),
            vec!["High development cost per unit ($550,000)"]
        );
        assert_eq!(
            impacts.mitigation_strategies(&thresholds.mitigations),
            vec!["Explore value capture and inclusionary zoning"]
        );
    }

    #[test]
    fn aggressive_plan_raises_displacement_concern() {
        let impacts = categories(&draft_plan(Archetype::Aggressive, 21, 3, 0.15), &mission());
        let concerns = impacts.key_concerns(&ConcernThresholds::default());
        assert_eq!(concerns[0], "Moderate displacement risk (37.0%)");
        assert!(concerns.contains(&"May accelerate gentrification pressures".to_string()));
        let strategies = impacts.mitigation_strategies(&MitigationThresholds::default());
        assert!(strategies.contains(&"Include community land trust opportunities".to_string()));
        assert!(!strategies.contains(&"Implement right of first refusal for existing tenants".to_string()));
    }

    #[test]
    fn quiet_plan_falls_back_to_default_lines() {
        let baseline = AreaBaseline {
            walk_potential: 0.0,
            ..AreaBaseline::default()
        };
        let impacts = categories(&draft_plan(Archetype::Conservative, 0, 0, 0.0), &baseline);
        let thresholds = ScoringThresholds::default();

        assert_eq!(
            impacts.key_benefits(&thresholds.benefits),
            vec!["Provides new housing opportunities in transit-rich area"]
        );
        assert_eq!(
            impacts.key_concerns(&thresholds.concerns),
            vec!["Standard development review and approval process required"]
        );
        assert_eq!(impacts.mitigation_strategies(&thresholds.mitigations).len(), 2);
    }

    #[test]
    fn format_dollars_groups_thousands() {
        assert_eq!(format_dollars(600_000.0), "$600,000");
        assert_eq!(format_dollars(1_234_567.4), "$1,234,567");
        assert_eq!(format_dollars(999.0), "$999");
        assert_eq!(format_dollars(-1500.0), "-$1,500");
    }
}
