//! Civic Planner - Zoning-constrained development scenarios and impact analysis
//!
//! Given a planning brief for a neighborhood, this crate generates candidate
//! development plans that respect the area's zoning, scores each plan's
//! housing, accessibility, equity, economic and environmental impacts, and
//! ranks the plans into a recommendation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
