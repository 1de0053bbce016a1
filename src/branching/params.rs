//! Validated parameters for the branching process and the subsampling
//! emulator.
//!
//! Purpose
//! -------
//! Keep domain checks for `(length, m, h̄)` and `α` in one place so the
//! simulation loops can assume well-formed inputs.
//!
//! Invariants
//! ----------
//! - `length ≥ 1`.
//! - `0 < m < 1`: `m ≥ 1` is supercritical/critical and never stationary,
//!   so it is rejected rather than simulated.
//! - `h̄` finite and `> 0`.
//! - `0 < α ≤ 1`.
use crate::branching::errors::{ProcessError, ProcessResult};

/// SimulationParams: branching-process configuration.
///
/// Fields
/// ------
/// - `length`: number of time steps returned.
/// - `branching_ratio`: per-individual offspring probability `m`.
/// - `target_mean_activity`: stationary mean `h̄` of the process.
///
/// The Poisson immigration rate is derived from the stationary fixed point
/// `h̄ = m h̄ + λ`, i.e. `λ = h̄ (1 − m)`; see [`Self::immigration_rate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    length: usize,
    branching_ratio: f64,
    target_mean_activity: f64,
}

impl SimulationParams {
    /// Validate and build simulation parameters.
    ///
    /// # Errors
    /// - [`ProcessError::InvalidLength`] when `length == 0`.
    /// - [`ProcessError::InvalidBranchingRatio`] unless `0 < m < 1`.
    /// - [`ProcessError::InvalidTargetActivity`] unless `h̄` is finite and `> 0`.
    pub fn new(
        length: usize, branching_ratio: f64, target_mean_activity: f64,
    ) -> ProcessResult<Self> {
        if length == 0 {
            return Err(ProcessError::InvalidLength { length });
        }
        if !(branching_ratio > 0.0 && branching_ratio < 1.0) {
            return Err(ProcessError::InvalidBranchingRatio { value: branching_ratio });
        }
        if !(target_mean_activity.is_finite() && target_mean_activity > 0.0) {
            return Err(ProcessError::InvalidTargetActivity { value: target_mean_activity });
        }
        Ok(Self { length, branching_ratio, target_mean_activity })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn branching_ratio(&self) -> f64 {
        self.branching_ratio
    }

    pub fn target_mean_activity(&self) -> f64 {
        self.target_mean_activity
    }

    /// Mean of the per-step Poisson immigration, `h̄ (1 − m)`.
    pub fn immigration_rate(&self) -> f64 {
        self.target_mean_activity * (1.0 - self.branching_ratio)
    }
}

/// SubsamplingParams: probability that an individual is observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsamplingParams {
    retention_probability: f64,
}

impl SubsamplingParams {
    /// # Errors
    /// [`ProcessError::InvalidRetentionProbability`] unless `0 < α ≤ 1`.
    pub fn new(retention_probability: f64) -> ProcessResult<Self> {
        if !(retention_probability > 0.0 && retention_probability <= 1.0) {
            return Err(ProcessError::InvalidRetentionProbability {
                value: retention_probability,
            });
        }
        Ok(Self { retention_probability })
    }

    pub fn retention_probability(&self) -> f64 {
        self.retention_probability
    }

    /// `true` when every individual is observed (α = 1).
    pub fn is_identity(&self) -> bool {
        self.retention_probability == 1.0
    }
}
