//! Count samplers used by the simulator and the subsampling emulator.
//!
//! Both laws come from `rand_distr` (BTPE for the binomial, PTRS for the
//! Poisson), so the expected cost of a draw does not grow with the count.
//! The wrappers return counts and short-circuit the empty-population case.
use crate::branching::errors::{ProcessError, ProcessResult};
use rand::Rng;
use rand_distr::{Binomial, Distribution, Poisson};

/// Draw `Binomial(n, p)`. Returns 0 without consuming entropy when `n == 0`.
pub(crate) fn binomial<R: Rng + ?Sized>(n: u64, p: f64, rng: &mut R) -> ProcessResult<u64> {
    if n == 0 {
        return Ok(0);
    }
    let dist = Binomial::new(n, p).map_err(|err| ProcessError::SamplerConstruction {
        distribution: "binomial",
        text: err.to_string(),
    })?;
    Ok(dist.sample(rng))
}

/// Build a reusable `Poisson(lambda)` sampler.
pub(crate) fn poisson(lambda: f64) -> ProcessResult<Poisson<f64>> {
    Poisson::new(lambda).map_err(|err| ProcessError::SamplerConstruction {
        distribution: "poisson",
        text: err.to_string(),
    })
}

pub(crate) fn poisson_draw<R: Rng + ?Sized>(dist: &Poisson<f64>, rng: &mut R) -> u64 {
    let draw: f64 = dist.sample(rng);
    draw as u64
}
