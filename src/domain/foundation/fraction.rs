//! Fraction value object (0.0-1.0 scale).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ValidationError;

/// A value between 0.0 and 1.0 inclusive.
///
/// Used for every bounded score in the pipeline: compliance, risk,
/// confidence and benefit scores.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Fraction(f64);

impl Fraction {
    /// Zero.
    pub const ZERO: Self = Self(0.0);

    /// One.
    pub const ONE: Self = Self(1.0);

    /// Creates a new Fraction, clamping to the valid range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a Fraction, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("fraction", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value on a 0-100 scale.
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Fraction::try_new(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.as_percent())
    }
}
