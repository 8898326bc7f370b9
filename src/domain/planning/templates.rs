//! Fixed narrative templates for generated plans.

use super::{InnovativeFocus, PlanVariant, PlanningBrief, TransitAccess};

/// Names, rationale and policy lines attached to a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanNarrative {
    pub name: String,
    pub description: String,
    pub design_rationale: Vec<String>,
    pub policy_alignment: Vec<String>,
    pub required_variances: Vec<String>,
}

/// Plan facts the templates branch on.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeInputs<'a> {
    pub brief: &'a PlanningBrief,
    pub zone_requires_commercial: bool,
    pub total_units: u32,
    pub lot_area_sf: f64,
    pub max_far: f64,
    pub affordable_pct: f64,
    pub zone_affordable_req: f64,
}

/// Keyword-triggered lines: (keyword, rationale, policy).
const KEYWORD_LINES: &[(&str, &str, &str)] = &[
    (
        "historic",
        "Context-sensitive massing for historic character",
        "Historic preservation review",
    ),
    (
        "displacement",
        "Tenant protections and right-to-return provisions",
        "Anti-displacement policy",
    ),
    (
        "flood",
        "Flood-resilient ground floor design",
        "Flood resilience requirements",
    ),
    (
        "transit",
        "Transit-oriented site layout",
        "Transit-oriented development",
    ),
];

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds the narrative for a variant.
pub fn narrative_for(variant: PlanVariant, inputs: &NarrativeInputs<'_>) -> PlanNarrative {
    let area = &inputs.brief.area.display_name;
    let mut narrative = match variant {
        PlanVariant::Conservative => PlanNarrative {
            name: format!("Conservative {} Development", area),
            description: "Low-risk approach prioritizing zoning compliance and community acceptance"
                .to_string(),
            design_rationale: lines(&[
                "Prioritizes zoning compliance",
                "Conservative density for community acceptance",
                "Meets minimum affordability requirements",
            ]),
            policy_alignment: lines(&[
                "Full zoning compliance",
                "Community-scale development",
                "Standard inclusionary housing",
            ]),
            required_variances: Vec::new(),
        },
        PlanVariant::Moderate => {
            let reduced_parking = inputs.brief.area.transit_access == TransitAccess::Excellent;
            PlanNarrative {
                name: format!("Moderate {} Development", area),
                description:
                    "Balanced approach optimizing units while maintaining neighborhood character"
                        .to_string(),
                design_rationale: vec![
                    "Balanced density and community fit".to_string(),
                    "Enhanced affordability targets".to_string(),
                    if reduced_parking {
                        "Transit-oriented parking optimization"
                    } else {
                        "Standard parking provision"
                    }
                    .to_string(),
                ],
                policy_alignment: vec![
                    "Planning code alignment".to_string(),
                    "Enhanced inclusionary housing".to_string(),
                    if reduced_parking {
                        "Transit-supportive design"
                    } else {
                        "Standard zoning compliance"
                    }
                    .to_string(),
                ],
                required_variances: if reduced_parking {
                    lines(&["parking_reduction"])
                } else {
                    Vec::new()
                },
            }
        }
        PlanVariant::Aggressive => {
            let mut variances = lines(&["parking_reduction"]);
            if f64::from(inputs.total_units) > inputs.lot_area_sf * inputs.max_far / 600.0 {
                variances.push("density_bonus".to_string());
            }
            if inputs.affordable_pct > inputs.zone_affordable_req * 1.3 {
                variances.push("affordability_bonus".to_string());
            }
            PlanNarrative {
                name: format!("Maximum Density {} Development", area),
                description: "High-impact development maximizing units and affordability"
                    .to_string(),
                design_rationale: vec![
                    "Maximum allowable density".to_string(),
                    "Highest feasible affordability percentage".to_string(),
                    "Transit-oriented minimal parking".to_string(),
                    if inputs.zone_requires_commercial {
                        "Active ground floor commercial"
                    } else {
                        "Residential focus"
                    }
                    .to_string(),
                ],
                policy_alignment: lines(&[
                    "Affordable housing maximization",
                    "Transit-oriented development",
                    "Density bonus program eligibility",
                ]),
                required_variances: variances,
            }
        }
        PlanVariant::Innovative(InnovativeFocus::Displacement) => PlanNarrative {
            name: format!("Community Land Trust {}", area),
            description: "Anti-displacement development with community ownership model".to_string(),
            design_rationale: lines(&[
                "Community land trust model",
                "40% permanently affordable units",
                "Local business preservation space",
                "Resident equity building",
            ]),
            policy_alignment: lines(&[
                "Anti-displacement policy",
                "Community ownership priority",
                "Cultural preservation",
            ]),
            required_variances: lines(&["community_ownership", "enhanced_affordability"]),
        },
        PlanVariant::Innovative(InnovativeFocus::Climate) => PlanNarrative {
            name: format!("Climate-Resilient {}", area),
            description: "Elevated development with flood adaptation and green infrastructure"
                .to_string(),
            design_rationale: lines(&[
                "Elevated above flood zones",
                "Green infrastructure integration",
                "Climate-adaptive building systems",
                "Resilient community space",
            ]),
            policy_alignment: lines(&[
                "Climate adaptation strategy",
                "Flood resilience requirements",
                "Green building standards",
            ]),
            required_variances: lines(&["elevated_construction", "flood_adaptation"]),
        },
        PlanVariant::Innovative(InnovativeFocus::Walkability) => PlanNarrative {
            name: format!("Walkable {} Hub", area),
            description: "Mixed-use development optimizing pedestrian experience".to_string(),
            design_rationale: lines(&[
                "Extensive ground floor activation",
                "Minimal parking for walkability",
                "Pedestrian-priority design",
                "Neighborhood amenity integration",
            ]),
            policy_alignment: lines(&[
                "Walkability improvement goals",
                "Active transportation support",
                "Neighborhood commercial vitality",
            ]),
            required_variances: lines(&["parking_reduction", "pedestrian_priority_design"]),
        },
    };

    for (keyword, rationale, policy) in KEYWORD_LINES {
        if !inputs.brief.mentions(keyword) {
            continue;
        }
        push_unique(&mut narrative.design_rationale, rationale);
        push_unique(&mut narrative.policy_alignment, policy);
    }

    narrative
}

fn push_unique(lines: &mut Vec<String>, line: &str) {
    if !lines.iter().any(|l| l == line) {
        lines.push(line.to_string());
    }
}
