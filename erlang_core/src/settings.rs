//! # Solver Settings
//!
//! Search ceilings and convergence parameters shared by the inverse solvers.
//! Settings serialize as JSON; any field missing from a file keeps its
//! default, so a file only needs to name what it changes.
//!
//! ```json
//! {
//!   "max_channels": 5000,
//!   "tolerance": 1e-9,
//!   "channel_search": "Linear"
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use erlang_core::settings::{ChannelSearch, SolverSettings};
//!
//! let settings = SolverSettings {
//!     max_channels: 5_000,
//!     channel_search: ChannelSearch::Linear,
//!     ..SolverSettings::default()
//! };
//! assert!(settings.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// Default ceiling for the channel search
pub const DEFAULT_MAX_CHANNELS: u32 = 20_000;

/// Default |Pr(N, A) - target| at which bisection stops early
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default bisection step limit
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Default ceiling for the traffic bracket, in Erlangs
pub const DEFAULT_MAX_TRAFFIC: f64 = 1e6;

/// Default decimals kept on a solved traffic value
pub const DEFAULT_TRAFFIC_DECIMALS: u32 = 6;

/// Strategy used to find the minimal channel count.
///
/// Both strategies return the same answer; binary search needs
/// O(log N) evaluations instead of N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelSearch {
    /// Scan N = 1, 2, 3, ... until the target is met
    Linear,
    /// Double N until the target is met, then bisect the last step
    #[default]
    Binary,
}

/// Parameters for the channel and traffic solvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Largest channel count the channel solver will consider
    pub max_channels: u32,

    /// Bisection stops once |Pr(N, A) - target| is within this bound
    pub tolerance: f64,

    /// Hard limit on bisection steps
    pub max_iterations: u32,

    /// Largest traffic (Erlangs) the traffic solver will bracket
    pub max_traffic: f64,

    /// Decimals kept on a solved traffic value (None = unrounded)
    pub traffic_decimals: Option<u32>,

    /// Channel search strategy
    pub channel_search: ChannelSearch,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            max_channels: DEFAULT_MAX_CHANNELS,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_traffic: DEFAULT_MAX_TRAFFIC,
            traffic_decimals: Some(DEFAULT_TRAFFIC_DECIMALS),
            channel_search: ChannelSearch::default(),
        }
    }
}

impl SolverSettings {
    /// Validate settings values.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(CalcError::invalid_input(
                "tolerance",
                self.tolerance.to_string(),
                "Tolerance must be a positive number",
            ));
        }
        if self.max_iterations == 0 {
            return Err(CalcError::invalid_input(
                "max_iterations",
                "0",
                "At least one bisection step is required",
            ));
        }
        if !(self.max_traffic > 0.0) || !self.max_traffic.is_finite() {
            return Err(CalcError::invalid_input(
                "max_traffic",
                self.max_traffic.to_string(),
                "Traffic ceiling must be a positive, finite number of Erlangs",
            ));
        }
        if let Some(decimals) = self.traffic_decimals {
            // f64 carries ~15-17 significant digits
            if decimals > 15 {
                return Err(CalcError::invalid_input(
                    "traffic_decimals",
                    decimals.to_string(),
                    "At most 15 decimals can be represented",
                ));
            }
        }
        Ok(())
    }
}

/// Load solver settings from a JSON file and validate them.
///
/// # Returns
///
/// * `Ok(SolverSettings)` - Parsed settings, defaults filled in
/// * `Err(CalcError::FileError)` - The file could not be read
/// * `Err(CalcError::SerializationError)` - The file is not valid settings JSON
/// * `Err(CalcError::InvalidInput)` - A value is out of range
pub fn load_settings(path: &Path) -> CalcResult<SolverSettings> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let settings: SolverSettings = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    settings.validate()?;
    debug!(path = %path.display(), ?settings, "loaded solver settings");

    Ok(settings)
}
