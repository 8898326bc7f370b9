//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems.

pub mod baseline;
