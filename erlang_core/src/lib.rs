//! # erlang_core - Erlang-B Teletraffic Engine
//!
//! `erlang_core` sizes loss systems (trunk groups, radio channels, ports)
//! with the Erlang-B formula. Given any two of offered traffic A, channel
//! count N and blocking probability Pr, it derives the third.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Overflow-safe**: Blocking is computed with the Erlang-B recurrence, never factorials
//! - **Honest answers**: Capped and unbounded results are values, bad inputs are errors
//! - **JSON-First**: Inputs, results and errors implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use erlang_core::{erlang_b, required_channels, offered_traffic, Solution};
//!
//! let pr = erlang_b(18, 10.0);
//! assert!(pr < 0.01);
//!
//! assert_eq!(required_channels(10.0, 0.01, 20_000), Solution::Exact(18));
//!
//! let a = offered_traffic(15, 0.01, 1e-9, 200, 1e6).unwrap();
//! assert!((a.value().unwrap() - 8.108).abs() < 1e-3);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Blocking probability, channel solver, traffic solver
//! - [`settings`] - Search ceilings and convergence parameters
//! - [`units`] - Erlangs and probability wrappers with validation
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::blocking::{erlang_b, loss_probability};
pub use calculations::channels::{required_channels, required_channels_linear};
pub use calculations::traffic::offered_traffic;
pub use calculations::{CalculationItem, CalculationOutput, Solution, TrafficSolution};
pub use errors::{CalcError, CalcResult};
pub use settings::{load_settings, ChannelSearch, SolverSettings};
