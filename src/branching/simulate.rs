//! Process simulator: stationary branching process with immigration.
//!
//! Purpose
//! -------
//! Generate integer activity from the recursion
//!
//! ```text
//! A_{t+1} = Binomial(A_t, m) + Poisson(h̄ (1 − m))
//! ```
//!
//! where every active unit independently triggers one unit at the next
//! step with probability `m`, and external input arrives as Poisson
//! immigration chosen so that the stationary mean equals `h̄`.
//!
//! Key behaviors
//! -------------
//! - All parameters are validated before the first draw.
//! - `A_0` is drawn from `Poisson(h̄)`, which matches both the stationary
//!   mean and the stationary variance (`h̄`) of the process.
//! - [`SimStart::Warm`](crate::branching::options::SimStart) discards a
//!   burn-in prefix before the returned window.
//! - Identical generator state yields an identical series.
//!
//! Testing notes
//! -------------
//! Unit tests check mean convergence, determinism and burn-in handling.
//! Parameter rejection lives in `params`.
use crate::branching::{
    draws::{binomial, poisson, poisson_draw},
    errors::{ProcessError, ProcessResult},
    options::SimOpts,
    params::SimulationParams,
    series::ActivitySeries,
};
use rand::Rng;
use tracing::debug;

/// Simulate `length` steps of a branching process from raw parameters.
///
/// Equivalent to [`simulate_branching`] with validated
/// [`SimulationParams`] and default [`SimOpts`].
///
/// # Errors
/// Any [`ProcessError`] raised by [`SimulationParams::new`].
///
/// # Example
/// ```
/// use mr_estimator::branching::{rng_from_seed, simulate};
///
/// let mut rng = rng_from_seed(Some(42));
/// let series = simulate(5_000, 0.9, 20.0, &mut rng)?;
/// assert_eq!(series.len(), 5_000);
/// # Ok::<(), mr_estimator::branching::ProcessError>(())
/// ```
pub fn simulate<R: Rng + ?Sized>(
    length: usize, branching_ratio: f64, target_mean_activity: f64, rng: &mut R,
) -> ProcessResult<ActivitySeries> {
    let params = SimulationParams::new(length, branching_ratio, target_mean_activity)?;
    simulate_branching(&params, &SimOpts::default(), rng)
}

/// Simulate a branching path under explicit start options.
///
/// The generator passed in is used directly; `opts.seed` is ignored here
/// and only consulted by [`SimOpts::rng`].
///
/// # Errors
/// - [`ProcessError::InvalidBurnIn`] when `burn_in + length` overflows.
/// - [`ProcessError::SamplerConstruction`] if a sampler rejects its parameters.
pub fn simulate_branching<R: Rng + ?Sized>(
    params: &SimulationParams, opts: &SimOpts, rng: &mut R,
) -> ProcessResult<ActivitySeries> {
    let length = params.length();
    let burn_in = opts.sim_start.burn_in();
    let total = burn_in
        .checked_add(length)
        .ok_or(ProcessError::InvalidBurnIn { burn_in, length })?;
    let m = params.branching_ratio();

    debug!(
        length,
        burn_in,
        branching_ratio = m,
        target_mean_activity = params.target_mean_activity(),
        "simulating branching process"
    );

    let seed_dist = poisson(params.target_mean_activity())?;
    let immigration = poisson(params.immigration_rate())?;

    let mut out = Vec::with_capacity(length);
    let mut current = poisson_draw(&seed_dist, rng);
    for t in 0..total {
        if t >= burn_in {
            out.push(current);
        }
        if t + 1 < total {
            current = binomial(current, m, rng)? + poisson_draw(&immigration, rng);
        }
    }

    Ok(ActivitySeries::from_vec(out))
}
