//! Domain layer containing the planning pipeline.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `zoning` - Zoning rules and the constraint validator
//! - `planning` - Planning briefs and the scenario generator
//! - `impact` - Per-category impact evaluation and synthesis
//! - `analysis` - Cross-plan ranking and recommendations
//! - `tables` - The immutable tables every component borrows

pub mod analysis;
pub mod foundation;
pub mod impact;
pub mod planning;
pub mod tables;
pub mod zoning;

#[cfg(test)]
pub(crate) mod test_support;
