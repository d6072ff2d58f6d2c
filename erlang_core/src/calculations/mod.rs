//! # Traffic Calculations
//!
//! The three Erlang-B calculations. Each follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ..) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`blocking`] - Blocking probability from channels and traffic
//! - [`channels`] - Minimal channel count for a traffic and grade of service
//! - [`traffic`] - Offered traffic a channel group carries at a grade of service
//!
//! The two inverse solvers can run out of search room. Their answers carry
//! that fact in [`Solution`] / [`TrafficSolution`] instead of an error, so a
//! caller can still show the best-effort bound alongside a warning.

pub mod blocking;
pub mod channels;
pub mod traffic;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::settings::SolverSettings;

// Re-export commonly used types
pub use blocking::{BlockingInput, BlockingResult};
pub use channels::{ChannelsInput, ChannelsResult};
pub use traffic::{TrafficInput, TrafficResult};

/// Outcome of a bounded search.
///
/// ## JSON Example
///
/// ```json
/// { "status": "Capped", "value": 20000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value")]
pub enum Solution<T> {
    /// The value satisfies the target
    Exact(T),
    /// The search ceiling was reached first; the value is the ceiling
    Capped(T),
}

impl<T: Copy> Solution<T> {
    /// The value regardless of exactness
    pub fn value(&self) -> T {
        match self {
            Solution::Exact(v) | Solution::Capped(v) => *v,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Solution::Exact(_))
    }

    pub fn is_capped(&self) -> bool {
        matches!(self, Solution::Capped(_))
    }
}

/// Outcome of the traffic solver.
///
/// A target blocking of 1 (or more) is met by any finite load, so the answer
/// is unbounded rather than a large number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value")]
pub enum TrafficSolution {
    /// Traffic (Erlangs) whose blocking is within tolerance of the target
    Exact(f64),
    /// The bracket reached the traffic ceiling without meeting the target
    Capped(f64),
    /// Every finite traffic meets the target
    Unbounded,
}

impl TrafficSolution {
    /// Finite traffic value, `None` when unbounded
    pub fn value(&self) -> Option<f64> {
        match self {
            TrafficSolution::Exact(a) | TrafficSolution::Capped(a) => Some(*a),
            TrafficSolution::Unbounded => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, TrafficSolution::Exact(_))
    }

    pub fn is_capped(&self) -> bool {
        matches!(self, TrafficSolution::Capped(_))
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, TrafficSolution::Unbounded)
    }
}

/// Enum wrapper for all calculation types.
///
/// Lets a batch of heterogeneous calculations live in one JSON array.
///
/// ```json
/// [
///   { "type": "Blocking", "label": "A", "channels": 18, "traffic_erlangs": 10.0 },
///   { "type": "Channels", "label": "B", "traffic_erlangs": 10.0, "target_blocking": 0.01 },
///   { "type": "Traffic", "label": "C", "channels": 15, "target_blocking": 0.01 }
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Blocking probability from (N, A)
    Blocking(BlockingInput),
    /// Minimal channels from (A, Pr)
    Channels(ChannelsInput),
    /// Offered traffic from (N, Pr)
    Traffic(TrafficInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Blocking(b) => &b.label,
            CalculationItem::Channels(c) => &c.label,
            CalculationItem::Traffic(t) => &t.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Blocking(_) => "Blocking",
            CalculationItem::Channels(_) => "Channels",
            CalculationItem::Traffic(_) => "Traffic",
        }
    }

    /// Run the calculation with the given solver settings.
    pub fn evaluate(&self, settings: &SolverSettings) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Blocking(input) => blocking::calculate(input).map(CalculationOutput::Blocking),
            CalculationItem::Channels(input) => {
                channels::calculate(input, settings).map(CalculationOutput::Channels)
            }
            CalculationItem::Traffic(input) => {
                traffic::calculate(input, settings).map(CalculationOutput::Traffic)
            }
        }
    }
}

/// Result of evaluating a [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Blocking(BlockingResult),
    Channels(ChannelsResult),
    Traffic(TrafficResult),
}

impl CalculationOutput {
    /// True when a solver hit its search ceiling
    pub fn is_capped(&self) -> bool {
        match self {
            CalculationOutput::Blocking(_) => false,
            CalculationOutput::Channels(r) => r.channels.is_capped(),
            CalculationOutput::Traffic(r) => r.traffic.is_capped(),
        }
    }
}
