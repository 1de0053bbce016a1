//! Configuration for the MR estimator.
//!
//! Purpose
//! -------
//! Bundle the choices an MR estimation run depends on:
//! - how lag-k coefficients are computed ([`CoefficientMethod`]),
//! - how the exponential fit is started ([`InitialGuess`]),
//! - optimizer tolerances and line search ([`FitOptions`]).
//!
//! Defaults
//! --------
//! `StationaryMean`, `ProfileScan`, and `FitOptions::default()`
//! (`tol_grad = 1e-10`, `tol_cost = 1e-14`, `max_iter = 500`, More–Thuente).
use crate::{
    mr_estimation::errors::MRError,
    optimization::least_squares::FitOptions,
};
use std::str::FromStr;

/// How the lag-k coefficient `r_k` is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoefficientMethod {
    /// Lag-k autocovariance around the global mean with `1/(n−k)`
    /// normalization, divided by the lag-0 variance with `1/n`.
    #[default]
    StationaryMean,
    /// Slope of the least-squares regression of `x[t+k]` on `x[t]`; each
    /// window is centered on its own mean.
    Regression,
}

impl FromStr for CoefficientMethod {
    type Err = MRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "stationary_mean" | "stationarymean" => Ok(CoefficientMethod::StationaryMean),
            "regression" => Ok(CoefficientMethod::Regression),
            _ => Err(MRError::InvalidMethod { name: s.to_string() }),
        }
    }
}

/// Starting point for the exponential fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialGuess {
    /// `A₀ = r₁`, `m₀ = r₁`.
    FirstLag,
    /// Grid search over autocorrelation times with the closed-form optimal
    /// amplitude at each candidate `m`.
    #[default]
    ProfileScan,
}

/// MROptions: estimator configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MROptions {
    pub method: CoefficientMethod,
    pub initial_guess: InitialGuess,
    pub fit: FitOptions,
}

impl MROptions {
    pub fn new(method: CoefficientMethod, initial_guess: InitialGuess, fit: FitOptions) -> Self {
        Self { method, initial_guess, fit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Method names parse case-insensitively with `-` or `_` separators.
    //
    // Given
    // -----
    // - "Stationary-Mean", "REGRESSION", "median".
    //
    // Expect
    // ------
    // - Two successes and one `InvalidMethod`.
    fn coefficient_method_parses_names() {
        assert_eq!(
            "Stationary-Mean".parse::<CoefficientMethod>(),
            Ok(CoefficientMethod::StationaryMean)
        );
        assert_eq!("REGRESSION".parse::<CoefficientMethod>(), Ok(CoefficientMethod::Regression));
        assert!(matches!(
            "median".parse::<CoefficientMethod>(),
            Err(MRError::InvalidMethod { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Defaults match the documented configuration.
    //
    // Given
    // -----
    // - `MROptions::default()`.
    //
    // Expect
    // ------
    // - StationaryMean, ProfileScan, default optimizer options.
    fn defaults_are_documented_values() {
        let opts = MROptions::default();
        assert_eq!(opts.method, CoefficientMethod::StationaryMean);
        assert_eq!(opts.initial_guess, InitialGuess::ProfileScan);
        assert_eq!(opts.fit, FitOptions::default());
    }
}
