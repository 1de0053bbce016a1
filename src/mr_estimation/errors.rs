//! Errors for multistep-regression (MR) estimation.
//!
//! ## Conventions
//! - Precondition failures (`InvalidMaxLag`, `InsufficientData`,
//!   `ZeroVariance`) are raised before any coefficient is computed.
//! - A failed exponential fit is reported as [`MRError::FitDivergence`]
//!   and still carries the naive lag-1 estimate, which is always
//!   computable once the preconditions hold.
//! - Optimizer configuration errors are wrapped in
//!   [`MRError::InvalidOptions`].
use crate::optimization::errors::OptError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for MR estimation.
pub type MRResult<T> = Result<T, MRError>;

#[derive(Debug, Clone, PartialEq)]
pub enum MRError {
    // ---- Parameter validation ----
    /// Maximum lag must be at least 1.
    InvalidMaxLag { max_lag: usize },

    /// The series is too short for the requested lag range (every lag needs
    /// an overlapping pair; regression windows need two points).
    InsufficientData { max_lag: usize, len: usize },

    /// Unknown coefficient-method name.
    InvalidMethod { name: String },

    // ---- Degenerate input ----
    /// The series is constant, so autocorrelations are undefined.
    ZeroVariance,

    // ---- Fit ----
    /// The exponential fit did not converge or produced non-finite values.
    FitDivergence { naive_branching_ratio: f64, reason: String },

    /// Optimizer options were rejected.
    InvalidOptions(OptError),

    // ---- Inference ----
    /// Confidence level must lie in (0, 1).
    InvalidConfidenceLevel { level: f64 },
}

impl std::error::Error for MRError {}

impl std::fmt::Display for MRError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MRError::InvalidMaxLag { max_lag } => {
                write!(f, "Invalid maximum lag {max_lag}: must be at least 1")
            }
            MRError::InsufficientData { max_lag, len } => {
                write!(
                    f,
                    "Insufficient data: {len} observations are too few for maximum lag {max_lag}"
                )
            }
            MRError::InvalidMethod { name } => {
                write!(
                    f,
                    "Unknown coefficient method '{name}': expected 'stationary_mean' or 'regression'"
                )
            }
            MRError::ZeroVariance => {
                write!(f, "Series has zero variance; autocorrelation is undefined")
            }
            MRError::FitDivergence { naive_branching_ratio, reason } => {
                write!(
                    f,
                    "Exponential fit failed ({reason}); naive branching ratio = {naive_branching_ratio}"
                )
            }
            MRError::InvalidOptions(err) => write!(f, "Invalid estimator options: {err}"),
            MRError::InvalidConfidenceLevel { level } => {
                write!(f, "Invalid confidence level {level}: must lie in (0, 1)")
            }
        }
    }
}

impl From<OptError> for MRError {
    fn from(err: OptError) -> Self {
        MRError::InvalidOptions(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<MRError> for PyErr {
    fn from(err: MRError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
