//! Constraint violations reported by the validator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a violation. Only `Error` blocks validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// The planning rule a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    UnknownZone,
    FloorAreaRatio,
    BuildingHeight,
    InclusionaryHousing,
    GroundFloorCommercial,
}

impl ViolationKind {
    /// Returns the display name of the rule.
    pub fn rule_name(&self) -> &'static str {
        match self {
            ViolationKind::UnknownZone => "Unknown Zone Type",
            ViolationKind::FloorAreaRatio => "Floor Area Ratio",
            ViolationKind::BuildingHeight => "Building Height",
            ViolationKind::InclusionaryHousing => "Inclusionary Housing",
            ViolationKind::GroundFloorCommercial => "Ground Floor Commercial",
        }
    }

    /// True for dimensional limits that a variance or rezoning can lift.
    pub fn is_dimensional(&self) -> bool {
        matches!(self, ViolationKind::FloorAreaRatio | ViolationKind::BuildingHeight)
    }
}

/// A single rule finding with a remediation suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: ViolationKind,
    pub current_value: f64,
    pub max_allowed: f64,
    pub severity: Severity,
    pub suggestion: String,
}

impl Violation {
    /// Creates an error-severity violation.
    pub fn error(
        rule: ViolationKind,
        current_value: f64,
        max_allowed: f64,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            current_value,
            max_allowed,
            severity: Severity::Error,
            suggestion: suggestion.into(),
        }
    }

    /// Creates a warning-severity violation.
    pub fn warning(
        rule: ViolationKind,
        current_value: f64,
        max_allowed: f64,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            current_value,
            max_allowed,
            severity: Severity::Warning,
            suggestion: suggestion.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// How far the proposed value exceeds the limit, as a ratio (1.0 = at limit).
    pub fn excess_ratio(&self) -> f64 {
        if self.max_allowed <= 0.0 {
            return f64::INFINITY;
        }
        self.current_value / self.max_allowed
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(
                f,
                "{}: {} exceeds limit of {}",
                self.rule.rule_name(),
                self.current_value,
                self.max_allowed
            ),
            Severity::Warning => write!(f, "{}: {}", self.rule.rule_name(), self.suggestion),
        }
    }
}

/// Result of validating one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationOutcome {
    /// Builds an outcome; validity is derived from the violation severities.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let is_valid = violations.iter().all(|v| !v.is_error());
        Self {
            is_valid,
            violations,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| !v.is_error())
    }

    /// Finds the first violation of a given rule.
    pub fn find(&self, rule: ViolationKind) -> Option<&Violation> {
        self.violations.iter().find(|v| v.rule == rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_validity_follows_error_severity() {
        let warnings_only = ValidationOutcome::from_violations(vec![Violation::warning(
            ViolationKind::InclusionaryHousing,
            0.0,
            2.4,
            "Must include 2 affordable units (12%)",
        )]);
        assert!(warnings_only.is_valid);

        let with_error = ValidationOutcome::from_violations(vec![Violation::error(
            ViolationKind::FloorAreaRatio,
            1.5,
            0.8,
            "Reduce FAR to 0.8 or request variance",
        )]);
        assert!(!with_error.is_valid);
        assert_eq!(with_error.errors().count(), 1);
    }

    #[test]
    fn empty_outcome_is_valid() {
        assert!(ValidationOutcome::from_violations(vec![]).is_valid);
    }

    #[test]
    fn excess_ratio_compares_to_limit() {
        let v = Violation::error(ViolationKind::BuildingHeight, 60.0, 40.0, "");
        assert!((v.excess_ratio() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn error_display_reads_as_limit_breach() {
        let v = Violation::error(ViolationKind::BuildingHeight, 60.0, 40.0, "");
        assert_eq!(v.to_string(), "Building Height: 60 exceeds limit of 40");
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
    }
}
