//! mr_estimator: branching-process simulation and multistep-regression
//! branching-ratio estimation, with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the estimator to Python via the `_mr_estimator` extension module.
//!
//! Key behaviors
//! -------------
//! - [`branching`]: stationary branching process with Poisson immigration
//!   and binomial subsampling.
//! - [`mr_estimation`]: autocorrelation profile, naive lag-1 estimate and
//!   the MR fit `r_k = A · m^k`.
//! - [`optimization`]: L-BFGS least-squares minimizer used by the fit.
//! - With `python-bindings`, the `simulate_branching`,
//!   `simulate_binomial_subsampling` functions and the `MREstimation`
//!   class are exported to Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion and error mapping.
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! ```
//! use mr_estimator::{branching::prelude::*, mr_estimation::prelude::*};
//!
//! let mut rng = rng_from_seed(Some(1));
//! let full = simulate(20_000, 0.9, 100.0, &mut rng)?;
//! let sub = subsample(&full, 0.1, &mut rng)?;
//! let outcome = estimate(&sub, 40)?;
//! assert!(outcome.naive_branching_ratio() < outcome.branching_ratio());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` holds end-to-end runs of
//!   the simulate → subsample → estimate pipeline.

pub mod branching;
pub mod mr_estimation;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    branching::{rng_from_seed, simulate, subsample},
    mr_estimation::{MROptions, MROutcome},
    utils::{extract_activity, extract_fit_opts, extract_method},
};

/// Simulate a stationary branching process.
///
/// Parameters
/// ----------
/// - `length`: number of time steps.
/// - `m`: branching ratio, `0 < m < 1`.
/// - `activity`: target mean activity `h̄ > 0`.
/// - `seed`: optional RNG seed.
///
/// Returns a `uint64` numpy array of activity counts.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (length, m, activity, seed = None))]
pub fn simulate_branching<'py>(
    py: Python<'py>, length: usize, m: f64, activity: f64, seed: Option<u64>,
) -> PyResult<Bound<'py, PyArray1<u64>>> {
    let mut rng = rng_from_seed(seed);
    let series = simulate(length, m, activity, &mut rng)?;
    Ok(series.into_inner().into_pyarray(py))
}

/// Thin an activity series binomially with retention probability `alpha`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data, alpha, seed = None))]
pub fn simulate_binomial_subsampling<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, alpha: f64, seed: Option<u64>,
) -> PyResult<Bound<'py, PyArray1<u64>>> {
    let series = extract_activity(data)?;
    let mut rng = rng_from_seed(seed);
    let thinned = subsample(&series, alpha, &mut rng)?;
    Ok(thinned.into_inner().into_pyarray(py))
}

/// MREstimation: Python-facing wrapper for [`MROutcome`].
///
/// Constructed from Python via
/// `MREstimation(data, k_max, method="stationary_mean", tol_grad=None,
/// tol_cost=None, max_iter=None, line_searcher=None)`. The getters mirror
/// the keys of the classic MR toolbox result (`k`, `r_k`, `p_opt`,
/// `naive_branching_ratio`, `branching_ratio`) and add `stderr` and `tau`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "mr_estimator._mr_estimator")]
pub struct MREstimation {
    inner: MROutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl MREstimation {
    #[new]
    #[pyo3(
        signature = (
            data,
            k_max,
            method = None,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
        ),
        text_signature = "(data, k_max, /, method='stationary_mean', tol_grad=None, \
                          tol_cost=None, max_iter=None, line_searcher=None)"
    )]
    pub fn new(
        data: &Bound<'_, PyAny>, k_max: usize, method: Option<&str>, tol_grad: Option<f64>,
        tol_cost: Option<f64>, max_iter: Option<usize>, line_searcher: Option<&str>,
    ) -> PyResult<Self> {
        let series = extract_activity(data)?;
        let method = extract_method(method)?;
        let fit = extract_fit_opts(tol_grad, tol_cost, max_iter, line_searcher, None)?;
        let opts = MROptions { method, fit, ..MROptions::default() };
        let inner = MROutcome::mr_estimation(series.as_slice(), k_max, &opts)?;
        Ok(MREstimation { inner })
    }

    /// Lags `1..=k_max`.
    #[getter]
    pub fn k(&self) -> Vec<usize> {
        self.inner.lags().to_vec()
    }

    /// Autocorrelation coefficients aligned with `k`.
    #[getter]
    pub fn r_k(&self) -> Vec<f64> {
        self.inner.coefficients().to_vec()
    }

    /// Fitted `(A, m)`.
    #[getter]
    pub fn p_opt(&self) -> (f64, f64) {
        self.inner.fit_params()
    }

    #[getter]
    pub fn naive_branching_ratio(&self) -> f64 {
        self.inner.naive_branching_ratio()
    }

    #[getter]
    pub fn branching_ratio(&self) -> f64 {
        self.inner.branching_ratio()
    }

    #[getter]
    pub fn stderr(&self) -> Option<(f64, f64)> {
        self.inner.stderr()
    }

    /// Autocorrelation time `−1 / ln m`.
    #[getter]
    pub fn tau(&self) -> f64 {
        self.inner.autocorrelation_time()
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.optim().converged
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.optim().iterations
    }

    /// Two-sided confidence interval for `m`, or `None` without standard
    /// errors.
    #[pyo3(signature = (level = 0.95))]
    pub fn branching_ratio_interval(&self, level: f64) -> PyResult<Option<(f64, f64)>> {
        Ok(self.inner.branching_ratio_interval(level)?)
    }

    /// Evaluate the fitted `A · m^k` at the given lags.
    pub fn fitfunc(&self, k: Vec<f64>) -> Vec<f64> {
        k.into_iter().map(|lag| self.inner.fit().eval(lag)).collect()
    }
}

/// _mr_estimator: PyO3 module initializer for the Python extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _mr_estimator<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(simulate_branching, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_binomial_subsampling, m)?)?;
    m.add_class::<MREstimation>()?;
    Ok(())
}
