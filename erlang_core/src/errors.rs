//! # Error Types
//!
//! Structured error types for erlang_core. Only conditions that make a
//! request meaningless are errors; "capped" and "unbounded" answers are
//! ordinary values (see [`crate::calculations::Solution`] and
//! [`crate::calculations::TrafficSolution`]).
//!
//! ## Example
//!
//! ```rust
//! use erlang_core::errors::{CalcError, CalcResult};
//!
//! fn validate_traffic(traffic_erlangs: f64) -> CalcResult<()> {
//!     if !(traffic_erlangs >= 0.0) {
//!         return Err(CalcError::InvalidInput {
//!             field: "traffic_erlangs".to_string(),
//!             value: traffic_erlangs.to_string(),
//!             reason: "Traffic must be a non-negative number".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for erlang_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for traffic calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value violates its domain (negative traffic, zero channels, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error (settings files, batch files)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's values rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}
