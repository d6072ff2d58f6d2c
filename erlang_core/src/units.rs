//! # Unit Types
//!
//! Lightweight wrappers for the two continuous quantities of the Erlang-B
//! model. Both serialize as bare numbers.
//!
//! - Offered traffic: Erlangs (mean number of simultaneously busy servers)
//! - Blocking probability: dimensionless, 0..=1
//!
//! Channel counts are plain `u32`; the type already rules out negatives.
//!
//! ## Example
//!
//! ```rust
//! use erlang_core::units::{Erlangs, Probability};
//!
//! let load = Erlangs::checked("traffic_erlangs", 10.0).unwrap();
//! let gos = Probability::checked("target_blocking", 0.01).unwrap();
//! assert_eq!(gos.as_percent(), 1.0);
//! assert_eq!(load.value(), 10.0);
//!
//! assert!(Probability::checked("target_blocking", 1.2).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Traffic
// ============================================================================

/// Offered traffic intensity in Erlangs
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Erlangs(pub f64);

impl Erlangs {
    /// Validate a raw value as offered traffic (finite, non-negative).
    pub fn checked(field: &str, value: f64) -> CalcResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                "Traffic must be a finite, non-negative number of Erlangs",
            ));
        }
        Ok(Erlangs(value))
    }
}

// ============================================================================
// Probability
// ============================================================================

/// Blocking (loss) probability, 0 ≤ p ≤ 1
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probability(pub f64);

impl Probability {
    /// Validate a raw value as a probability in [0, 1].
    pub fn checked(field: &str, value: f64) -> CalcResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CalcError::invalid_input(
                field,
                value.to_string(),
                "Probability must be between 0 and 1",
            ));
        }
        Ok(Probability(value))
    }

    /// Probability expressed in percent (0.01 -> 1.0)
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }

    /// Complement 1 - p
    pub fn complement(self) -> Self {
        Probability(1.0 - self.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Erlangs);
impl_arithmetic!(Probability);

/// Traffic scaled by a probability: offered load times loss (or its complement).
impl Mul<Probability> for Erlangs {
    type Output = Erlangs;
    fn mul(self, rhs: Probability) -> Self::Output {
        Erlangs(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_traffic() {
        assert_eq!(Erlangs::checked("a", 0.0).unwrap(), Erlangs(0.0));
        assert!(Erlangs::checked("a", -1.0).is_err());
        assert!(Erlangs::checked("a", f64::NAN).is_err());
        assert!(Erlangs::checked("a", f64::INFINITY).is_err());
    }

    #[test]
    fn test_checked_probability() {
        assert!(Probability::checked("p", 0.0).is_ok());
        assert!(Probability::checked("p", 1.0).is_ok());
        assert!(Probability::checked("p", -0.001).is_err());
        assert!(Probability::checked("p", f64::NAN).is_err());

        let err = Probability::checked("target_blocking", 2.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_carried_and_lost_split() {
        let offered = Erlangs(10.0);
        let loss = Probability(0.25);
        let lost = offered * loss;
        let carried = offered * loss.complement();
        assert_eq!(lost.0, 2.5);
        assert_eq!((carried + lost).0, 10.0);
        assert_eq!((offered - lost).0, carried.0);
    }

    #[test]
    fn test_serialization() {
        let a = Erlangs(12.5);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Erlangs = serde_json::from_str(&json).unwrap();
        assert_eq!(a, roundtrip);
    }
}
