//! # Traffic Solver
//!
//! Offered traffic A at which N channels block with a given probability.
//! Blocking is continuous and non-decreasing in A, so the root is found by
//! bisection after a doubling pass has bracketed it:
//!
//! 1. `high = 1, 2, 4, ...` (clamped to `max_traffic`) until
//!    `erlang_b(N, high) >= target`
//! 2. bisect `[0, high]` until `|erlang_b(N, mid) - target| <= tolerance`,
//!    the bracket stops shrinking, or `max_iterations` steps have run
//!
//! ## Example
//!
//! ```rust
//! use erlang_core::calculations::traffic::{calculate, TrafficInput};
//! use erlang_core::settings::SolverSettings;
//!
//! let input = TrafficInput {
//!     label: "15 trunks".to_string(),
//!     channels: 15,
//!     target_blocking: 0.01,
//! };
//! let result = calculate(&input, &SolverSettings::default()).unwrap();
//! let erlangs = result.traffic.value().unwrap();
//! assert!((erlangs - 8.108).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::blocking::erlang_b;
use super::TrafficSolution;
use crate::errors::{CalcError, CalcResult};
use crate::settings::SolverSettings;
use crate::units::Probability;

/// Offered traffic for `channels` servers at `target` blocking, unrounded.
///
/// - `channels == 0` is an error: there is no capacity to solve for
/// - `target <= 0` gives `Exact(0.0)`
/// - `target >= 1` gives `Unbounded`
/// - no bracket below `max_traffic` gives `Capped(max_traffic)`
///
/// At most `max_iterations` bisection steps run, whatever the tolerance.
pub fn offered_traffic(
    channels: u32,
    target: f64,
    tolerance: f64,
    max_iterations: u32,
    max_traffic: f64,
) -> CalcResult<TrafficSolution> {
    if channels == 0 {
        return Err(CalcError::invalid_input(
            "channels",
            "0",
            "At least one channel is required to carry traffic",
        ));
    }
    if target.is_nan() {
        return Err(CalcError::invalid_input(
            "target_blocking",
            "NaN",
            "Probability must be between 0 and 1",
        ));
    }
    if !(tolerance >= 0.0) {
        return Err(CalcError::invalid_input(
            "tolerance",
            tolerance.to_string(),
            "Tolerance cannot be negative",
        ));
    }
    if !(max_traffic > 0.0) || !max_traffic.is_finite() {
        return Err(CalcError::invalid_input(
            "max_traffic",
            max_traffic.to_string(),
            "Traffic ceiling must be a positive, finite number of Erlangs",
        ));
    }

    if target <= 0.0 {
        return Ok(TrafficSolution::Exact(0.0));
    }
    if target >= 1.0 {
        return Ok(TrafficSolution::Unbounded);
    }

    let mut low = 0.0_f64;
    let mut high = max_traffic.min(1.0);
    while erlang_b(channels, high) < target && high < max_traffic {
        high = (high * 2.0).min(max_traffic);
    }
    if erlang_b(channels, high) < target {
        warn!(channels, target, max_traffic, "traffic bracket reached its ceiling");
        return Ok(TrafficSolution::Capped(max_traffic));
    }

    for step in 0..max_iterations {
        let mid = (low + high) / 2.0;
        if mid <= low || mid >= high {
            // Bracket is down to adjacent floats
            break;
        }

        let pr = erlang_b(channels, mid);
        trace!(step, low, high, mid, pr, "bisection step");
        if (pr - target).abs() <= tolerance {
            debug!(channels, target, traffic = mid, steps = step + 1, "traffic converged");
            return Ok(TrafficSolution::Exact(mid));
        }
        if pr < target {
            low = mid;
        } else {
            high = mid;
        }
    }

    let traffic = (low + high) / 2.0;
    debug!(channels, target, traffic, "traffic search stopped on bracket or step limit");
    Ok(TrafficSolution::Exact(traffic))
}

/// Run [`offered_traffic`] with the solver settings, rounding finite answers
/// to `settings.traffic_decimals`.
///
/// A positive root smaller than the rounding step is kept unrounded: 0 is
/// reserved for a zero target.
pub fn solve(channels: u32, target: f64, settings: &SolverSettings) -> CalcResult<TrafficSolution> {
    let solution = offered_traffic(
        channels,
        target,
        settings.tolerance,
        settings.max_iterations,
        settings.max_traffic,
    )?;

    Ok(match (solution, settings.traffic_decimals) {
        (TrafficSolution::Exact(a), Some(decimals)) => {
            let rounded = round_to(a, decimals);
            TrafficSolution::Exact(if rounded == 0.0 && a > 0.0 { a } else { rounded })
        }
        (other, _) => other,
    })
}

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Input parameters for a traffic capacity calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "15 trunks",
///   "channels": 15,
///   "target_blocking": 0.01
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficInput {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Number of channels N (at least 1)
    pub channels: u32,

    /// Grade of service: blocking probability to solve for
    pub target_blocking: f64,
}

impl TrafficInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.channels == 0 {
            return Err(CalcError::invalid_input(
                "channels",
                "0",
                "At least one channel is required to carry traffic",
            ));
        }
        Probability::checked("target_blocking", self.target_blocking)?;
        Ok(())
    }
}

/// Results from a traffic capacity calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "traffic": { "status": "Exact", "value": 8.108043 },
///   "achieved_blocking": 0.0099999
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficResult {
    /// Offered traffic in Erlangs, capped, or unbounded
    pub traffic: TrafficSolution,

    /// Blocking at the returned traffic (None when unbounded)
    pub achieved_blocking: Option<f64>,
}

/// Find the offered traffic a channel group carries at the target blocking.
///
/// # Returns
///
/// * `Ok(TrafficResult)` - Exact, capped, or unbounded traffic
/// * `Err(CalcError)` - If there are no channels or the target is out of range
pub fn calculate(input: &TrafficInput, settings: &SolverSettings) -> CalcResult<TrafficResult> {
    input.validate()?;

    let traffic = solve(input.channels, input.target_blocking, settings)?;

    Ok(TrafficResult {
        traffic,
        achieved_blocking: traffic.value().map(|a| erlang_b(input.channels, a)),
    })
}
