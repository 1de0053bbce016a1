//! least_squares: argmin-powered minimizer for smooth curve-fit objectives.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **minimizing**
//! smooth objectives `c(θ)` such as the residual sum of squares of a
//! nonlinear curve fit. Callers implement a single trait, [`Objective`], and
//! invoke [`minimize`] to run L-BFGS with a configurable line search,
//! tolerances, and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Bridge user objectives into Argmin via [`adapter::ArgMinAdapter`].
//! - Expose a single entrypoint [`minimize`] that:
//!   - validates the initial guess with [`Objective::check`],
//!   - selects an L-BFGS solver via [`builders`] based on [`traits::LineSearcher`],
//!   - executes the solver via [`run::run_lbfgs`], and
//!   - normalizes results into an [`OptimOutcome`].
//! - Fall back to central (then forward) finite differences when an
//!   analytic gradient is not implemented.
//! - Centralize configuration ([`Tolerances`], [`FitOptions`]) and
//!   validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - [`Objective::value`] and [`Objective::grad`] report invalid inputs as
//!   recoverable [`OptError`](crate::optimization::errors::OptError) values,
//!   not panics.
//! - Configuration types are validated on construction and treated as
//!   internally consistent by the solver layer.
//! - [`OptimOutcome::converged`] is only set for genuine solver convergence;
//!   callers decide how to treat an exhausted iteration budget.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover gradient handling in [`adapter`], solver
//!   construction in [`builders`], configuration and outcome invariants in
//!   [`traits`], and end-to-end minimization of toy objectives in [`api`].
//! - The MR estimator exercises [`minimize`] on real autocorrelation profiles.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{FitOptions, LineSearcher, Objective, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{FitOptions, LineSearcher, Objective, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
