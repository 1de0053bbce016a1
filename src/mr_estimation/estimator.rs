//! MR estimator entry points.
//!
//! Purpose
//! -------
//! Run the full multistep-regression pipeline on an activity series:
//! autocorrelation profile, naive lag-1 estimate, exponential fit and
//! standard errors, returned as one immutable [`MROutcome`].
//!
//! Key behaviors
//! -------------
//! - Preconditions are checked in order: `max_lag ≥ 1`, `max_lag < len`,
//!   non-zero variance.
//! - The naive estimate `r_1` is biased toward zero under subsampling,
//!   whereas the fitted `m` of `r_k = A · m^k` is not, because subsampling
//!   scales every `r_k` by the same factor and only moves `A`.
//! - A failed fit returns [`MRError::FitDivergence`] carrying `r_1`.
//!
//! Downstream usage
//! ----------------
//! - [`estimate`] for the common case (default [`MROptions`]).
//! - [`MROutcome::mr_estimation`] for explicit options or raw slices.
use crate::{
    branching::ActivitySeries,
    mr_estimation::{
        autocorrelation::AutocorrelationProfile,
        errors::{MRError, MRResult},
        fit::fit_exponential,
        model::FitFunction,
        options::{CoefficientMethod, MROptions},
    },
    optimization::least_squares::OptimOutcome,
};
use ndarray::Array1;
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::{debug, warn};

/// Estimate the branching ratio of `series` with lags `1..=max_lag`.
///
/// # Errors
/// See [`MROutcome::mr_estimation`].
///
/// # Example
/// ```
/// use mr_estimator::{branching::{rng_from_seed, simulate}, mr_estimation::estimate};
///
/// let mut rng = rng_from_seed(Some(7));
/// let series = simulate(20_000, 0.9, 50.0, &mut rng)?;
/// let outcome = estimate(&series, 40)?;
/// assert!((outcome.branching_ratio() - 0.9).abs() < 0.05);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn estimate(series: &ActivitySeries, max_lag: usize) -> MRResult<MROutcome> {
    MROutcome::mr_estimation(series.as_slice(), max_lag, &MROptions::default())
}

/// MROutcome: result of one MR estimation run.
///
/// Fields are private; all values are produced together by
/// [`MROutcome::mr_estimation`] and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MROutcome {
    lags: Vec<usize>,
    coefficients: Array1<f64>,
    fit: FitFunction,
    naive_branching_ratio: f64,
    stderr: Option<(f64, f64)>,
    optim: OptimOutcome,
    method: CoefficientMethod,
}

impl MROutcome {
    /// Run MR estimation on raw counts.
    ///
    /// Parameters
    /// ----------
    /// - `data`: activity counts, index = time step.
    /// - `k_max`: largest lag; the profile covers `k = 1..=k_max`.
    /// - `opts`: coefficient method, initial guess and optimizer settings.
    ///
    /// Errors
    /// ------
    /// - [`MRError::InvalidMaxLag`] when `k_max == 0`.
    /// - [`MRError::InsufficientData`] when `k_max >= data.len()`.
    /// - [`MRError::ZeroVariance`] for constant data.
    /// - [`MRError::InvalidOptions`] for rejected optimizer settings.
    /// - [`MRError::FitDivergence`] when the exponential fit fails.
    pub fn mr_estimation(data: &[u64], k_max: usize, opts: &MROptions) -> MRResult<Self> {
        debug!(len = data.len(), k_max, method = ?opts.method, "starting MR estimation");
        let profile = AutocorrelationProfile::compute(data, k_max, opts.method)?;
        let naive_branching_ratio = profile.first_lag();

        let fitted = fit_exponential(&profile, opts).inspect_err(|err| {
            if let MRError::FitDivergence { reason, .. } = err {
                warn!(naive_branching_ratio, %reason, "exponential fit failed");
            }
        })?;
        debug!(
            naive_branching_ratio,
            branching_ratio = fitted.fit.branching_ratio(),
            iterations = fitted.optim.iterations,
            "MR estimation finished"
        );

        let (lags, coefficients) = profile.into_parts();
        Ok(Self {
            lags,
            coefficients,
            fit: fitted.fit,
            naive_branching_ratio,
            stderr: fitted.stderr,
            optim: fitted.optim,
            method: opts.method,
        })
    }

    /// Lags `k = 1..=k_max`.
    pub fn lags(&self) -> &[usize] {
        &self.lags
    }

    /// Coefficients `r_k`, aligned with [`Self::lags`].
    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    pub fn fit(&self) -> &FitFunction {
        &self.fit
    }

    /// Fitted `(A, m)`.
    pub fn fit_params(&self) -> (f64, f64) {
        self.fit.params()
    }

    /// `r_1`.
    pub fn naive_branching_ratio(&self) -> f64 {
        self.naive_branching_ratio
    }

    /// Fitted `m`.
    pub fn branching_ratio(&self) -> f64 {
        self.fit.branching_ratio()
    }

    /// `−1 / ln m` of the fitted branching ratio; `NaN` outside `(0, 1)`.
    pub fn autocorrelation_time(&self) -> f64 {
        self.fit.autocorrelation_time()
    }

    /// Standard errors `(σ_A, σ_m)`, when computable.
    pub fn stderr(&self) -> Option<(f64, f64)> {
        self.stderr
    }

    /// Two-sided Student-t confidence interval for `m` at `level`.
    ///
    /// Uses `m ± t_{(1+level)/2, K−2} · σ_m` with `K` lags. Returns
    /// `Ok(None)` when no standard error is available.
    ///
    /// # Errors
    /// [`MRError::InvalidConfidenceLevel`] unless `0 < level < 1`.
    pub fn branching_ratio_interval(&self, level: f64) -> MRResult<Option<(f64, f64)>> {
        if !(level > 0.0 && level < 1.0) {
            return Err(MRError::InvalidConfidenceLevel { level });
        }
        let Some((_, sigma_m)) = self.stderr else {
            return Ok(None);
        };
        let dof = self.lags.len().saturating_sub(2) as f64;
        let Ok(student) = StudentsT::new(0.0, 1.0, dof) else {
            return Ok(None);
        };
        let half_width = student.inverse_cdf(0.5 + level / 2.0) * sigma_m;
        let m = self.branching_ratio();
        Ok(Some((m - half_width, m + half_width)))
    }

    /// Optimizer diagnostics.
    pub fn optim(&self) -> &OptimOutcome {
        &self.optim
    }

    pub fn method(&self) -> CoefficientMethod {
        self.method
    }

    /// The fitted curve evaluated at every lag.
    pub fn fitted_curve(&self) -> Array1<f64> {
        self.fit.eval_lags(&self.lags)
    }
}
