//! Subsampling emulator: independent binomial thinning of activity.
//!
//! Each of the `series[t]` active units is observed independently with
//! probability `α`, so `out[t] ~ Binomial(series[t], α)`. Consequences:
//! `out[t] ≤ series[t]` pointwise and `E[out[t]] = α · series[t]`.
//! For `α = 1` the input is returned unchanged and the generator is not
//! touched.
use crate::branching::{
    draws::binomial,
    errors::ProcessResult,
    params::SubsamplingParams,
    series::ActivitySeries,
};
use rand::Rng;
use tracing::debug;

/// Thin `series` with retention probability `retention_probability`.
///
/// # Errors
/// [`ProcessError::InvalidRetentionProbability`](crate::branching::ProcessError)
/// unless `0 < α ≤ 1`.
pub fn subsample<R: Rng + ?Sized>(
    series: &ActivitySeries, retention_probability: f64, rng: &mut R,
) -> ProcessResult<ActivitySeries> {
    let params = SubsamplingParams::new(retention_probability)?;
    subsample_binomial(series, &params, rng)
}

/// Thin `series` under validated [`SubsamplingParams`].
pub fn subsample_binomial<R: Rng + ?Sized>(
    series: &ActivitySeries, params: &SubsamplingParams, rng: &mut R,
) -> ProcessResult<ActivitySeries> {
    if params.is_identity() {
        return Ok(series.clone());
    }
    let alpha = params.retention_probability();
    debug!(len = series.len(), alpha, "subsampling activity");

    let thinned = series
        .as_slice()
        .iter()
        .map(|&n| binomial(n, alpha, rng))
        .collect::<ProcessResult<Vec<u64>>>()?;
    Ok(ActivitySeries::from_vec(thinned))
}
