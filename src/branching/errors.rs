//! Errors for branching-process simulation and subsampling.
//!
//! This module defines a single error type, [`ProcessError`], used by the
//! simulator, the subsampling emulator and their parameter builders. All
//! variants describe invalid configuration: no draw is made before the
//! parameters have been validated, so a returned error never leaves a
//! partially simulated series behind.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for simulation operations.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Unified error type for the process simulator and subsampling emulator.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessError {
    /// Simulation horizon must contain at least one step.
    InvalidLength { length: usize },

    /// Branching ratio must lie in the open interval (0, 1).
    InvalidBranchingRatio { value: f64 },

    /// Target mean activity must be finite and > 0.
    InvalidTargetActivity { value: f64 },

    /// Retention probability must lie in (0, 1].
    InvalidRetentionProbability { value: f64 },

    /// Burn-in plus horizon overflows `usize`.
    InvalidBurnIn { burn_in: usize, length: usize },

    /// A count sampler rejected its parameters.
    SamplerConstruction { distribution: &'static str, text: String },
}

impl std::error::Error for ProcessError {}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessError::InvalidLength { length } => {
                write!(f, "Invalid length {length}: must be at least 1")
            }
            ProcessError::InvalidBranchingRatio { value } => {
                write!(
                    f,
                    "Invalid branching ratio {value}: must satisfy 0 < m < 1 for a stationary process"
                )
            }
            ProcessError::InvalidTargetActivity { value } => {
                write!(f, "Invalid target mean activity {value}: must be finite and > 0")
            }
            ProcessError::InvalidRetentionProbability { value } => {
                write!(f, "Invalid retention probability {value}: must satisfy 0 < alpha <= 1")
            }
            ProcessError::InvalidBurnIn { burn_in, length } => {
                write!(f, "Burn-in {burn_in} plus length {length} overflows")
            }
            ProcessError::SamplerConstruction { distribution, text } => {
                write!(f, "Could not construct {distribution} sampler: {text}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ProcessError> for PyErr {
    fn from(err: ProcessError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
