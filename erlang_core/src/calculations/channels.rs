//! # Channel Solver
//!
//! Smallest channel count N with `erlang_b(N, A) <= target`. The bound is
//! inclusive: a channel count whose blocking equals the target qualifies.
//!
//! Blocking is non-increasing in N, so the first qualifying N can be found
//! either by walking N = 1, 2, 3, ... or by doubling N until the target is
//! met and bisecting the last step.
//! Both strategies are kept; they return identical answers.
//!
//! ## Example
//!
//! ```rust
//! use erlang_core::calculations::channels::required_channels;
//! use erlang_core::calculations::Solution;
//!
//! // 10 Erlangs at 1% blocking needs 18 trunks
//! assert_eq!(required_channels(10.0, 0.01, 20_000), Solution::Exact(18));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::blocking::{erlang_b, BlockingSeries};
use super::Solution;
use crate::errors::CalcResult;
use crate::settings::{ChannelSearch, SolverSettings};
use crate::units::{Erlangs, Probability};

/// Minimal channel count by binary search over [1, max_channels].
///
/// - `traffic <= 0` needs no channels: `Exact(0)`
/// - `target >= 1` is met by a single channel: `Exact(1)`
/// - no N up to `max_channels` qualifies: `Capped(max_channels)`
///
/// The upper end is found by doubling N = 1, 2, 4, ... first, so the cost
/// follows the answer rather than the ceiling.
pub fn required_channels(traffic: f64, target: f64, max_channels: u32) -> Solution<u32> {
    if let Some(trivial) = trivial_answer(traffic, target) {
        return trivial;
    }
    if max_channels == 0 {
        return Solution::Capped(0);
    }

    let meets = |n: u32| erlang_b(n, traffic) <= target;

    // Invariant: every N < lo fails.
    let (mut lo, mut hi) = (1u32, 1u32);
    while !meets(hi) {
        if hi >= max_channels {
            return Solution::Capped(max_channels);
        }
        lo = hi + 1;
        hi = hi.saturating_mul(2).min(max_channels);
    }

    // Invariant: meets(hi); every N < lo fails.
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if meets(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Solution::Exact(lo)
}

/// Minimal channel count by scanning N = 1, 2, 3, ... up to max_channels.
///
/// Same edge rules as [`required_channels`]. The scan steps the recurrence
/// once per candidate instead of re-evaluating from B(0).
pub fn required_channels_linear(traffic: f64, target: f64, max_channels: u32) -> Solution<u32> {
    if let Some(trivial) = trivial_answer(traffic, target) {
        return trivial;
    }

    BlockingSeries::new(traffic)
        .take(max_channels as usize)
        .find(|&(_, pr)| pr <= target)
        .map_or(Solution::Capped(max_channels), |(n, _)| Solution::Exact(n))
}

/// Dispatch on the configured strategy.
pub fn solve(traffic: f64, target: f64, max_channels: u32, search: ChannelSearch) -> Solution<u32> {
    let solution = match search {
        ChannelSearch::Binary => required_channels(traffic, target, max_channels),
        ChannelSearch::Linear => required_channels_linear(traffic, target, max_channels),
    };

    if solution.is_capped() {
        warn!(traffic, target, max_channels, "channel search reached its ceiling");
    } else {
        debug!(traffic, target, ?search, channels = solution.value(), "channel search done");
    }
    solution
}

fn trivial_answer(traffic: f64, target: f64) -> Option<Solution<u32>> {
    if traffic <= 0.0 {
        Some(Solution::Exact(0))
    } else if target >= 1.0 {
        Some(Solution::Exact(1))
    } else {
        None
    }
}

/// Input parameters for a channel dimensioning calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Site A",
///   "traffic_erlangs": 10.0,
///   "target_blocking": 0.01
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelsInput {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Offered traffic A in Erlangs
    pub traffic_erlangs: f64,

    /// Grade of service: highest acceptable blocking probability
    pub target_blocking: f64,
}

impl ChannelsInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        Erlangs::checked("traffic_erlangs", self.traffic_erlangs)?;
        Probability::checked("target_blocking", self.target_blocking)?;
        Ok(())
    }
}

/// Results from a channel dimensioning calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "channels": { "status": "Exact", "value": 18 },
///   "achieved_blocking": 0.007142
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelsResult {
    /// Minimal channel count, or the search ceiling when capped
    pub channels: Solution<u32>,

    /// Blocking probability actually obtained with that many channels
    pub achieved_blocking: f64,
}

/// Find the minimal number of channels for the given traffic and grade of service.
///
/// # Returns
///
/// * `Ok(ChannelsResult)` - Exact or capped channel count
/// * `Err(CalcError)` - If traffic or target blocking are out of range
pub fn calculate(input: &ChannelsInput, settings: &SolverSettings) -> CalcResult<ChannelsResult> {
    input.validate()?;

    let channels = solve(
        input.traffic_erlangs,
        input.target_blocking,
        settings.max_channels,
        settings.channel_search,
    );

    Ok(ChannelsResult {
        channels,
        achieved_blocking: erlang_b(channels.value(), input.traffic_erlangs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        assert_eq!(required_channels(10.0, 0.01, 20_000), Solution::Exact(18));
        assert_eq!(required_channels_linear(10.0, 0.01, 20_000), Solution::Exact(18));
        // 8.11 Erlangs at 1% fits on 15 trunks
        assert_eq!(required_channels(8.1, 0.01, 20_000), Solution::Exact(15));
    }

    #[test]
    fn test_no_traffic_needs_no_channels() {
        assert_eq!(required_channels(0.0, 0.01, 100), Solution::Exact(0));
        assert_eq!(required_channels_linear(0.0, 0.01, 100), Solution::Exact(0));
    }

    #[test]
    fn test_target_of_one_needs_one_channel() {
        assert_eq!(required_channels(50.0, 1.0, 100), Solution::Exact(1));
        assert_eq!(required_channels_linear(50.0, 1.5, 100), Solution::Exact(1));
    }

    #[test]
    fn test_inclusive_boundary() {
        // B(1, 1.0) is exactly 0.5
        assert_eq!(required_channels(1.0, 0.5, 100), Solution::Exact(1));
        assert_eq!(required_channels_linear(1.0, 0.5, 100), Solution::Exact(1));
        // B(2, 1.0) is exactly 0.2
        assert_eq!(required_channels(1.0, 0.2, 100), Solution::Exact(2));
    }

    #[test]
    fn test_capped_at_ceiling() {
        assert_eq!(required_channels(1000.0, 0.001, 50), Solution::Capped(50));
        assert_eq!(required_channels_linear(1000.0, 0.001, 50), Solution::Capped(50));
        assert_eq!(required_channels(5.0, 0.0, 200), Solution::Capped(200));
        assert_eq!(required_channels(5.0, 0.01, 0), Solution::Capped(0));
        assert_eq!(required_channels_linear(5.0, 0.01, 0), Solution::Capped(0));
    }

    #[test]
    fn test_cost_follows_answer_not_ceiling() {
        // Answer is 4; neither strategy may walk toward the u32 ceiling
        assert_eq!(required_channels(1e-3, 1e-12, u32::MAX), Solution::Exact(4));
        assert_eq!(required_channels_linear(1e-3, 1e-12, u32::MAX), Solution::Exact(4));
        assert_eq!(required_channels(10.0, 0.01, u32::MAX), Solution::Exact(18));
        // Target 0 is met once the blocking underflows to 0
        assert_eq!(required_channels(1.0, 0.0, u32::MAX), required_channels_linear(1.0, 0.0, u32::MAX));
    }

    #[test]
    fn test_strategies_agree() {
        for &traffic in &[0.1, 0.9, 2.5, 10.0, 47.3, 120.0] {
            for &target in &[0.5, 0.1, 0.02, 0.01, 0.001, 1e-6] {
                assert_eq!(
                    required_channels(traffic, target, 1_000),
                    required_channels_linear(traffic, target, 1_000),
                    "traffic={} target={}",
                    traffic,
                    target
                );
            }
        }
    }

    #[test]
    fn test_calculate_reports_achieved_blocking() {
        let input = ChannelsInput {
            label: "Site A".to_string(),
            traffic_erlangs: 10.0,
            target_blocking: 0.01,
        };
        let result = calculate(&input, &SolverSettings::default()).unwrap();
        assert_eq!(result.channels, Solution::Exact(18));
        assert!((result.achieved_blocking - 0.007142).abs() < 1e-6);
    }

    #[test]
    fn test_calculate_uses_linear_setting() {
        let settings = SolverSettings {
            channel_search: ChannelSearch::Linear,
            max_channels: 10,
            ..SolverSettings::default()
        };
        let input = ChannelsInput {
            label: String::new(),
            traffic_erlangs: 10.0,
            target_blocking: 0.01,
        };
        let result = calculate(&input, &settings).unwrap();
        assert_eq!(result.channels, Solution::Capped(10));
        assert_eq!(result.achieved_blocking, erlang_b(10, 10.0));
    }

    #[test]
    fn test_invalid_inputs() {
        let settings = SolverSettings::default();
        let negative = ChannelsInput {
            label: String::new(),
            traffic_erlangs: -1.0,
            target_blocking: 0.01,
        };
        assert!(calculate(&negative, &settings).is_err());

        let bad_target = ChannelsInput {
            label: String::new(),
            traffic_erlangs: 1.0,
            target_blocking: f64::NAN,
        };
        assert!(calculate(&bad_target, &settings).is_err());
    }
}
