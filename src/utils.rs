//! Python-boundary helpers: input extraction and option building.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! is called from the PyO3 wrappers in `lib.rs`.

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::{
    branching::ActivitySeries,
    mr_estimation::{CoefficientMethod, MRError},
    optimization::least_squares::{FitOptions, LineSearcher, Tolerances},
};

#[cfg(feature = "python-bindings")]
use std::str::FromStr;

/// Convert a 1-D array-like of non-negative integers into an
/// [`ActivitySeries`].
///
/// Accepts `int64`/`uint64` numpy arrays, `float64` arrays holding integral
/// values, objects with `.to_numpy()` (pandas), and plain sequences.
#[cfg(feature = "python-bindings")]
pub fn extract_activity(raw_data: &Bound<'_, PyAny>) -> PyResult<ActivitySeries> {
    if let Ok(arr) = raw_data.extract::<PyReadonlyArray1<u64>>() {
        return Ok(ActivitySeries::from_vec(arr.as_array().to_vec()));
    }
    if let Ok(arr) = raw_data.extract::<PyReadonlyArray1<i64>>() {
        return signed_to_series(arr.as_array().iter().copied());
    }
    if let Ok(arr) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return float_to_series(arr.as_array().iter().copied());
    }
    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if !obj.is(raw_data) {
            return extract_activity(&obj);
        }
    }

    let values: Vec<i64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of non-negative integers",
        )
    })?;
    signed_to_series(values.into_iter())
}

#[cfg(feature = "python-bindings")]
fn signed_to_series(values: impl Iterator<Item = i64>) -> PyResult<ActivitySeries> {
    let out = values
        .enumerate()
        .map(|(index, v)| {
            u64::try_from(v).map_err(|_| {
                PyValueError::new_err(format!(
                    "activity must be non-negative; got {v} at index {index}"
                ))
            })
        })
        .collect::<PyResult<Vec<u64>>>()?;
    Ok(ActivitySeries::from_vec(out))
}

#[cfg(feature = "python-bindings")]
fn float_to_series(values: impl Iterator<Item = f64>) -> PyResult<ActivitySeries> {
    let out = values
        .enumerate()
        .map(|(index, v)| {
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
                Ok(v as u64)
            } else {
                Err(PyValueError::new_err(format!(
                    "activity must hold non-negative integer counts; got {v} at index {index}"
                )))
            }
        })
        .collect::<PyResult<Vec<u64>>>()?;
    Ok(ActivitySeries::from_vec(out))
}

/// Build [`FitOptions`] from optional Python arguments.
///
/// Missing tolerances fall back to the defaults of
/// [`FitOptions::default`]; a missing line searcher means More–Thuente.
#[cfg(feature = "python-bindings")]
pub fn extract_fit_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<FitOptions> {
    let defaults = FitOptions::default().tols;
    let tols = Tolerances::new(
        tol_grad.or(defaults.tol_grad),
        tol_cost.or(defaults.tol_cost),
        max_iter.or(defaults.max_iter),
    )
    .map_err(MRError::from)?;

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(MRError::from)?,
        None => LineSearcher::MoreThuente,
    };

    let opts = FitOptions::new(tols, ls, false, lbfgs_mem).map_err(MRError::from)?;
    Ok(opts)
}

/// Parse a coefficient-method name such as `"stationary_mean"`.
#[cfg(feature = "python-bindings")]
pub fn extract_method(method: Option<&str>) -> PyResult<CoefficientMethod> {
    match method {
        Some(name) => Ok(CoefficientMethod::from_str(name)?),
        None => Ok(CoefficientMethod::default()),
    }
}
