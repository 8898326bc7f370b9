//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for one analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(Uuid);

impl AnalysisId {
    /// Creates a new random AnalysisId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic identifier of a candidate plan, e.g. `mission_moderate_001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    /// Creates a new PlanId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("plan_id"));
        }
        Ok(Self(id))
    }

    /// Builds the id for an area and a plan slug.
    pub(crate) fn for_area(area_key: &str, slug: &str) -> Self {
        Self(format!("{}_{}_001", area_key, slug))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_id_new_generates_unique_ids() {
        assert_ne!(AnalysisId::new(), AnalysisId::new());
    }

    #[test]
    fn analysis_id_serializes_as_uuid_string() {
        let id = AnalysisId::new();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json.as_str(), Some(id.to_string().as_str()));
        assert!(Uuid::parse_str(&id.to_string()).is_ok());
    }

    #[test]
    fn plan_id_rejects_blank() {
        assert!(PlanId::new("").is_err());
        assert!(PlanId::new("   ").is_err());
    }

    #[test]
    fn plan_id_for_area_formats_slug() {
        let id = PlanId::for_area("mission", "innovative_displacement");
        assert_eq!(id.as_str(), "mission_innovative_displacement_001");
    }

    #[test]
    fn plan_id_serializes_as_plain_string() {
        let id = PlanId::new("marina_moderate_001").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"marina_moderate_001\"");
    }
}
