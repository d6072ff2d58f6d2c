//! # Blocking Probability
//!
//! Forward Erlang-B formula: the probability that an arriving call finds all
//! `N` channels busy when `A` Erlangs are offered and blocked calls are
//! cleared (M/M/N/N).
//!
//! The closed form `(A^N/N!) / Σ A^k/k!` overflows for a few hundred
//! channels, so the value is built with the first-order recurrence
//!
//! ```text
//! B(0) = 1
//! B(i) = A·B(i-1) / (i + A·B(i-1))
//! ```
//!
//! which only ever handles numbers in [0, A].
//!
//! ## Example
//!
//! ```rust
//! use erlang_core::calculations::blocking::{erlang_b, calculate, BlockingInput};
//!
//! assert_eq!(erlang_b(1, 1.0), 0.5);
//!
//! let input = BlockingInput {
//!     label: "Trunk group 1".to_string(),
//!     channels: 18,
//!     traffic_erlangs: 10.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert!(result.blocking_probability < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::units::{Erlangs, Probability};

/// Erlang-B blocking probability for `channels` servers offered `traffic` Erlangs.
///
/// - `traffic <= 0` gives 0 (no input, no loss), including for `channels == 0`
/// - `channels == 0` with positive traffic gives 1 (everything is lost)
/// - a non-finite intermediate saturates to 1
///
/// Always returns a value in [0, 1]. O(channels) time, O(1) space; the loop
/// ends early once the value underflows to 0, since it stays 0 from there.
pub fn erlang_b(channels: u32, traffic: f64) -> f64 {
    if traffic <= 0.0 {
        return 0.0;
    }
    if channels == 0 || !traffic.is_finite() {
        return 1.0;
    }

    for (n, pr) in BlockingSeries::new(traffic) {
        if n == channels || pr == 0.0 {
            return pr;
        }
    }
    1.0
}

/// Successive values `(N, B(N))` for N = 1, 2, 3, ... at a fixed traffic.
///
/// Each step is one application of the recurrence, so walking the series up
/// to N costs the same as a single [`erlang_b`] call for N. Once an
/// intermediate stops being finite every later value is 1; once the value
/// underflows to 0 every later value is 0.
#[derive(Debug, Clone)]
pub struct BlockingSeries {
    traffic: f64,
    channels: u32,
    b: f64,
    saturated: bool,
}

impl BlockingSeries {
    /// Start the series at B(0) = 1.
    pub fn new(traffic: f64) -> Self {
        BlockingSeries {
            traffic,
            channels: 0,
            b: 1.0,
            saturated: false,
        }
    }
}

impl Iterator for BlockingSeries {
    type Item = (u32, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.channels = self.channels.checked_add(1)?;

        if !self.saturated && self.b != 0.0 {
            let ab = self.traffic * self.b;
            self.b = ab / (f64::from(self.channels) + ab);
            self.saturated = !self.b.is_finite();
        }

        let pr = if self.saturated { 1.0 } else { self.b.clamp(0.0, 1.0) };
        Some((self.channels, pr))
    }
}

/// Same quantity as [`erlang_b`], named for the loss view of the result.
pub fn loss_probability(channels: u32, traffic: f64) -> f64 {
    erlang_b(channels, traffic)
}

/// Input parameters for a blocking probability calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "PBX trunks",
///   "channels": 18,
///   "traffic_erlangs": 10.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockingInput {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Number of channels N
    pub channels: u32,

    /// Offered traffic A in Erlangs
    pub traffic_erlangs: f64,
}

impl BlockingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        Erlangs::checked("traffic_erlangs", self.traffic_erlangs)?;
        Ok(())
    }
}

/// Results from a blocking probability calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "blocking_probability": 0.007142,
///   "carried_traffic_erlangs": 9.9286,
///   "lost_traffic_erlangs": 0.0714
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockingResult {
    /// Erlang-B blocking probability Pr(N, A)
    pub blocking_probability: f64,

    /// Traffic actually served, A·(1 - Pr)
    pub carried_traffic_erlangs: f64,

    /// Traffic blocked and cleared, A·Pr
    pub lost_traffic_erlangs: f64,
}

impl BlockingResult {
    /// Check if the result meets a grade of service (inclusive)
    pub fn meets(&self, target_blocking: f64) -> bool {
        self.blocking_probability <= target_blocking
    }
}

/// Calculate the blocking probability and the carried/lost traffic split.
///
/// # Returns
///
/// * `Ok(BlockingResult)` - Calculation results
/// * `Err(CalcError)` - If the traffic is negative or not a number
pub fn calculate(input: &BlockingInput) -> CalcResult<BlockingResult> {
    input.validate()?;

    let offered = Erlangs(input.traffic_erlangs);
    let pr = Probability(erlang_b(input.channels, input.traffic_erlangs));

    Ok(BlockingResult {
        blocking_probability: pr.value(),
        carried_traffic_erlangs: (offered * pr.complement()).value(),
        lost_traffic_erlangs: (offered * pr).value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_channels() {
        assert_eq!(erlang_b(0, 5.0), 1.0);
        assert_eq!(erlang_b(0, 0.0), 0.0);
    }

    #[test]
    fn test_zero_traffic() {
        for n in [0, 1, 10, 1000] {
            assert_eq!(erlang_b(n, 0.0), 0.0);
        }
    }

    #[test]
    fn test_single_channel() {
        // B(1, A) = A / (1 + A)
        assert_eq!(erlang_b(1, 1.0), 0.5);
        assert!((erlang_b(1, 3.0) - 0.75).abs() < 1e-15);
    }

    #[test]
    fn test_table_values() {
        // Standard Erlang-B table
        assert!((erlang_b(17, 10.0) - 0.012949).abs() < 1e-6);
        assert!((erlang_b(18, 10.0) - 0.007142).abs() < 1e-6);
        assert!((erlang_b(2, 1.0) - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_large_inputs_stay_finite() {
        // The factorial form overflows long before this
        let pr = erlang_b(5_000, 4_800.0);
        assert!(pr.is_finite());
        assert!(pr > 0.0 && pr < 1.0);

        assert_eq!(erlang_b(100, f64::INFINITY), 1.0);
        assert_eq!(erlang_b(100, f64::NAN), 1.0);
    }

    #[test]
    fn test_series_matches_direct_evaluation() {
        let traffic = 7.3;
        for (n, pr) in BlockingSeries::new(traffic).take(50) {
            assert_eq!(pr, erlang_b(n, traffic));
        }
    }

    #[test]
    fn test_series_saturates() {
        let mut series = BlockingSeries::new(f64::INFINITY);
        assert_eq!(series.next(), Some((1, 1.0)));
        assert_eq!(series.next(), Some((2, 1.0)));
    }

    #[test]
    fn test_underflow_ends_the_recurrence() {
        // B(N, 1) underflows to 0 near N = 180; the rest of the range is skipped
        assert_eq!(erlang_b(u32::MAX, 1.0), 0.0);
        assert_eq!(erlang_b(u32::MAX, 1e-3), 0.0);

        let mut series = BlockingSeries::new(1e-3).skip_while(|&(_, pr)| pr > 0.0);
        assert_eq!(series.next().map(|(_, pr)| pr), Some(0.0));
        assert_eq!(series.next().map(|(_, pr)| pr), Some(0.0));
    }

    #[test]
    fn test_loss_probability_alias() {
        assert_eq!(loss_probability(15, 8.0), erlang_b(15, 8.0));
    }

    #[test]
    fn test_blocking_calculation() {
        let input = BlockingInput {
            label: "B-1".to_string(),
            channels: 18,
            traffic_erlangs: 10.0,
        };
        let result = calculate(&input).unwrap();

        assert!((result.blocking_probability - 0.007142).abs() < 1e-6);
        assert!((result.carried_traffic_erlangs + result.lost_traffic_erlangs - 10.0).abs() < 1e-12);
        assert!(result.meets(0.01));
        assert!(!result.meets(0.005));
    }

    #[test]
    fn test_blocking_calculation_extremes() {
        let overload = calculate(&BlockingInput {
            label: String::new(),
            channels: 0,
            traffic_erlangs: 1e300,
        })
        .unwrap();
        assert_eq!(overload.blocking_probability, 1.0);
        assert_eq!(overload.carried_traffic_erlangs, 0.0);
        assert_eq!(overload.lost_traffic_erlangs, 1e300);

        let idle = calculate(&BlockingInput {
            label: String::new(),
            channels: 0,
            traffic_erlangs: 0.0,
        })
        .unwrap();
        assert_eq!(idle.blocking_probability, 0.0);
        assert_eq!(idle.lost_traffic_erlangs, 0.0);
    }

    #[test]
    fn test_invalid_traffic() {
        let input = BlockingInput {
            label: String::new(),
            channels: 5,
            traffic_erlangs: -2.0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_serialization() {
        let json = r#"{ "channels": 4, "traffic_erlangs": 2.5 }"#;
        let input: BlockingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.label, "");
        assert_eq!(input.channels, 4);
        assert_eq!(input.traffic_erlangs, 2.5);
    }
}
