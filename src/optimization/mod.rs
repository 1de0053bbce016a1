//! optimization: curve-fit optimizer and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting: an Argmin-backed
//! L-BFGS minimizer (`least_squares`) together with a single error/result
//! surface (`errors::OptError`, `OptResult<T>`). Callers implement an
//! objective, choose tolerances, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Conventions
//! -----------
//! - Parameters and gradients are `ndarray` vectors (`Theta`, `Grad`).
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module avoids I/O and logging; progress output is only produced
//!   by the optional slog observer (`obs_slog` feature) when requested via
//!   `FitOptions::verbose`.
//!
//! Downstream usage
//! ----------------
//! - The MR estimator implements `Objective` for the exponential-decay
//!   residual sum of squares and calls `minimize`.
//! - Front-ends import the curated surface via `optimization::prelude::*`.

pub mod errors;
pub mod least_squares;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::least_squares::prelude::*;
}
