//! mr_estimation: multistep-regression (MR) branching-ratio estimator.
//!
//! Purpose
//! -------
//! Estimate the branching ratio `m` of an activity series from the decay of
//! its lag-k autocorrelations, `r_k = A · m^k`, instead of from `r_1`
//! alone. Under binomial subsampling every `r_k` is scaled by the same
//! factor, so `A` absorbs the bias and the fitted `m` stays consistent.
//!
//! Key behaviors
//! -------------
//! - [`autocorrelation`]: two-pass `r_k` with two coefficient methods.
//! - [`fit`]: L-BFGS least-squares fit with analytic gradient, profile-scan
//!   starting point and asymptotic standard errors.
//! - [`estimator`]: the public pipeline ([`estimate`],
//!   [`MROutcome::mr_estimation`]).
//!
//! Conventions
//! -----------
//! - Lags are 1-based: `lags()[0] == 1`.
//! - All fallible operations return [`MRResult`].
//!
//! Testing notes
//! -------------
//! Closed-form checks live next to each submodule; simulation-based checks
//! live in `estimator` and in the crate's integration tests.

pub mod autocorrelation;
pub mod errors;
pub mod estimator;
pub mod fit;
pub mod model;
pub mod options;
pub mod validation;

pub use self::autocorrelation::AutocorrelationProfile;
pub use self::errors::{MRError, MRResult};
pub use self::estimator::{MROutcome, estimate};
pub use self::model::FitFunction;
pub use self::options::{CoefficientMethod, InitialGuess, MROptions};

pub mod prelude {
    pub use super::{
        AutocorrelationProfile, CoefficientMethod, FitFunction, InitialGuess, MRError, MROptions,
        MROutcome, MRResult, estimate,
    };
}
