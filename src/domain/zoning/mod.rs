//! Zoning Module - Rule tables and constraint validation.
//!
//! # Components
//!
//! - `ZoneType` - Planning-code classifications and the upzoning hierarchy
//! - `ZoningRulebook` - Immutable rule, unit-size and neighborhood tables
//! - `ConstraintValidator` - Proposal validation, unit estimates, upzoning
//!
//! Violations are data: a failed check is reported through
//! [`ValidationOutcome`], never as a Rust error.

mod rules;
mod validator;
mod violation;
mod zone_type;

pub use rules::{
    normalize_area_key, ZoningRule, ZoningRulebook, DEFAULT_AVG_UNIT_SIZE_SF,
    DEFAULT_NEIGHBORHOOD_ZONE,
};
pub use validator::{
    ConstraintValidator, Proposal, UnitEstimate, UpzoneSuggestion, DEFAULT_BUILDING_EFFICIENCY,
    INCLUSIONARY_THRESHOLD_UNITS,
};
pub use violation::{Severity, ValidationOutcome, Violation, ViolationKind};
pub use zone_type::{ZoneType, UPZONE_HIERARCHY};
