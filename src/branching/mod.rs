//! branching: process simulator and subsampling emulator.
//!
//! Purpose
//! -------
//! Produce synthetic neural-style activity: a stationary branching process
//! with Poisson immigration ([`simulate`]) and its binomially subsampled
//! observation ([`subsample`]). Both are pure functions of their inputs and
//! an injected `rand::Rng`.
//!
//! Key behaviors
//! -------------
//! - Parameters are validated up front (`SimulationParams`,
//!   `SubsamplingParams`); invalid inputs return [`ProcessError`].
//! - Outputs are freshly owned [`ActivitySeries`] values.
//!
//! Downstream usage
//! ----------------
//! - Feed the resulting series to
//!   [`mr_estimation::estimate`](crate::mr_estimation::estimate).
//! - Import the curated surface via `branching::prelude::*`.

mod draws;
pub mod errors;
pub mod options;
pub mod params;
pub mod series;
pub mod simulate;
pub mod subsample;

pub use self::errors::{ProcessError, ProcessResult};
pub use self::options::{SimOpts, SimStart, rng_from_seed};
pub use self::params::{SimulationParams, SubsamplingParams};
pub use self::series::ActivitySeries;
pub use self::simulate::{simulate, simulate_branching};
pub use self::subsample::{subsample, subsample_binomial};

pub mod prelude {
    pub use super::{
        ActivitySeries, ProcessError, ProcessResult, SimOpts, SimStart, SimulationParams,
        SubsamplingParams, rng_from_seed, simulate, simulate_branching, subsample,
        subsample_binomial,
    };
}
