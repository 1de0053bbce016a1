//! Lag-k autocorrelation profile of an activity series.
//!
//! Purpose
//! -------
//! Compute `r_k` for `k = 1..=k_max`, the input of the MR fit.
//!
//! Key behaviors
//! -------------
//! - Two-pass evaluation in `f64`: the mean is computed first, then all
//!   sums run over centered values. This avoids the cancellation of
//!   one-pass `Σx² − n x̄²` formulas on large counts.
//! - [`CoefficientMethod::StationaryMean`]:
//!   `r_k = [Σ_t d_t d_{t+k} / (n−k)] / [Σ_t d_t² / n]` with `d_t = x_t − x̄`.
//! - [`CoefficientMethod::Regression`]: slope of the least-squares line of
//!   `x[k..]` on `x[..n−k]`, each window centered on its own mean. Every
//!   window needs at least two points, so this method requires
//!   `k_max ≤ n − 2`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Lag ranges are validated first
//!   ([`validate_max_lag`](super::validation::validate_max_lag)); a
//!   regression window of one point is [`MRError::InsufficientData`].
//! - Zero variance (of the series, or of a regression window with at least
//!   two points) yields [`MRError::ZeroVariance`].
//! - A profile always holds at least one lag.
use crate::mr_estimation::{
    errors::{MRError, MRResult},
    options::CoefficientMethod,
    validation::{validate_max_lag, validate_variance},
};
use ndarray::Array1;

/// AutocorrelationProfile: `(k, r_k)` pairs for `k = 1..=k_max`.
#[derive(Debug, Clone, PartialEq)]
pub struct AutocorrelationProfile {
    lags: Vec<usize>,
    coefficients: Array1<f64>,
}

impl AutocorrelationProfile {
    /// Compute the profile of `data` up to `k_max`.
    ///
    /// # Errors
    /// - Lag-range errors from `validate_max_lag`.
    /// - [`MRError::ZeroVariance`] for constant data or constant windows.
    pub fn compute(data: &[u64], k_max: usize, method: CoefficientMethod) -> MRResult<Self> {
        validate_max_lag(k_max, data.len())?;
        let x: Vec<f64> = data.iter().map(|&v| v as f64).collect();
        let coefficients = match method {
            CoefficientMethod::StationaryMean => stationary_mean_coefficients(&x, k_max)?,
            CoefficientMethod::Regression => regression_coefficients(&x, k_max)?,
        };
        Ok(Self { lags: (1..=k_max).collect(), coefficients })
    }

    /// Wrap externally computed coefficients; `coefficients[i]` is `r_{i+1}`.
    ///
    /// # Errors
    /// [`MRError::InvalidMaxLag`] when `coefficients` is empty.
    pub fn from_coefficients(coefficients: Array1<f64>) -> MRResult<Self> {
        if coefficients.is_empty() {
            return Err(MRError::InvalidMaxLag { max_lag: 0 });
        }
        Ok(Self { lags: (1..=coefficients.len()).collect(), coefficients })
    }

    pub fn lags(&self) -> &[usize] {
        &self.lags
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    /// Lags as `f64`, the abscissa of the exponential fit.
    pub fn lags_f64(&self) -> Array1<f64> {
        self.lags.iter().map(|&k| k as f64).collect()
    }

    /// `r_1`, the conventional lag-1 estimate of the branching ratio.
    ///
    /// Both constructors reject empty profiles, so index 0 always exists.
    pub fn first_lag(&self) -> f64 {
        self.coefficients[0]
    }

    pub fn len(&self) -> usize {
        self.lags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lags.is_empty()
    }

    pub fn into_parts(self) -> (Vec<usize>, Array1<f64>) {
        (self.lags, self.coefficients)
    }
}

fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

fn stationary_mean_coefficients(x: &[f64], k_max: usize) -> MRResult<Array1<f64>> {
    let n = x.len();
    let mu = mean(x);
    let d: Vec<f64> = x.iter().map(|v| v - mu).collect();
    let var0 = d.iter().map(|v| v * v).sum::<f64>() / n as f64;
    validate_variance(var0)?;

    let coefficients = (1..=k_max)
        .map(|k| {
            let cov = d[..n - k].iter().zip(&d[k..]).map(|(a, b)| a * b).sum::<f64>();
            cov / (n - k) as f64 / var0
        })
        .collect();
    Ok(coefficients)
}

fn regression_coefficients(x: &[f64], k_max: usize) -> MRResult<Array1<f64>> {
    let n = x.len();
    if n - k_max < 2 {
        return Err(MRError::InsufficientData { max_lag: k_max, len: n });
    }
    let mu = mean(x);
    validate_variance(x.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / n as f64)?;

    let mut coefficients = Array1::zeros(k_max);
    for (i, k) in (1..=k_max).enumerate() {
        let head = &x[..n - k];
        let tail = &x[k..];
        let (mh, mt) = (mean(head), mean(tail));
        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for (a, b) in head.iter().zip(tail) {
            let da = a - mh;
            sxy += da * (b - mt);
            sxx += da * da;
        }
        if !(sxx > 0.0) {
            return Err(MRError::ZeroVariance);
        }
        coefficients[i] = sxy / sxx;
    }
    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Closed-form checks on tiny series plus precondition handling. The
    // statistical behavior on simulated data is covered in the estimator and
    // integration tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `r_1` equals a direct, independently written lag-1 formula.
    //
    // Given
    // -----
    // - x = [1, 3, 2, 5, 4, 6, 2, 3].
    //
    // Expect
    // ------
    // - `first_lag()` matches the textbook expression to 1e-12.
    fn first_lag_matches_direct_formula() {
        // Arrange
        let data = [1_u64, 3, 2, 5, 4, 6, 2, 3];
        let n = data.len() as f64;
        let mu = data.iter().sum::<u64>() as f64 / n;
        let var = data.iter().map(|&v| (v as f64 - mu).powi(2)).sum::<f64>() / n;
        let mut cov = 0.0;
        for t in 0..data.len() - 1 {
            cov += (data[t] as f64 - mu) * (data[t + 1] as f64 - mu);
        }
        let expected = cov / (n - 1.0) / var;

        // Act
        let profile = AutocorrelationProfile::compute(&data, 3, CoefficientMethod::StationaryMean)
            .expect("valid input");

        // Assert
        assert_eq!(profile.lags(), &[1, 2, 3]);
        assert_abs_diff_eq!(profile.first_lag(), expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The regression method recovers an exact linear relation between the
    // lagged windows.
    //
    // Given
    // -----
    // - An alternating series [0, 2, 0, 2, ...] of length 20.
    //
    // Expect
    // ------
    // - r_1 = −1 and r_2 = +1 exactly (up to rounding).
    fn regression_recovers_alternating_slope() {
        let data: Vec<u64> = (0..20).map(|t| if t % 2 == 0 { 0 } else { 2 }).collect();

        let profile = AutocorrelationProfile::compute(&data, 2, CoefficientMethod::Regression)
            .expect("valid input");

        assert_abs_diff_eq!(profile.coefficients()[0], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(profile.coefficients()[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The regression method needs two points in its last window.
    //
    // Given
    // -----
    // - A non-constant 6-point series with k_max = 5 and k_max = 4.
    //
    // Expect
    // ------
    // - InsufficientData for k_max = 5 (a one-point window), then Ok; the
    //   stationary-mean method accepts k_max = 5.
    fn regression_rejects_single_point_window() {
        let data = [1_u64, 4, 2, 7, 3, 5];

        assert_eq!(
            AutocorrelationProfile::compute(&data, 5, CoefficientMethod::Regression),
            Err(MRError::InsufficientData { max_lag: 5, len: 6 })
        );
        assert!(AutocorrelationProfile::compute(&data, 4, CoefficientMethod::Regression).is_ok());
        assert!(
            AutocorrelationProfile::compute(&data, 5, CoefficientMethod::StationaryMean).is_ok()
        );
    }

    #[test]
    // Purpose
    // -------
    // Externally supplied coefficients must contain at least r_1.
    //
    // Given
    // -----
    // - An empty array, then [0.5, 0.25].
    //
    // Expect
    // ------
    // - InvalidMaxLag for the empty array; lags [1, 2] and r_1 = 0.5 otherwise.
    fn from_coefficients_rejects_empty_profile() {
        assert_eq!(
            AutocorrelationProfile::from_coefficients(Array1::zeros(0)),
            Err(MRError::InvalidMaxLag { max_lag: 0 })
        );

        let profile = AutocorrelationProfile::from_coefficients(ndarray::array![0.5, 0.25])
            .expect("non-empty");

        assert_eq!(profile.lags(), &[1, 2]);
        assert_eq!(profile.first_lag(), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Degenerate and undersized inputs fail before any coefficient is
    // produced.
    //
    // Given
    // -----
    // - A constant series; a 5-point series with k_max = 5; k_max = 0.
    //
    // Expect
    // ------
    // - ZeroVariance (both methods), InsufficientData, InvalidMaxLag.
    fn compute_rejects_invalid_inputs() {
        let constant = [7_u64; 50];
        for method in [CoefficientMethod::StationaryMean, CoefficientMethod::Regression] {
            assert_eq!(
                AutocorrelationProfile::compute(&constant, 5, method),
                Err(MRError::ZeroVariance)
            );
        }
        assert_eq!(
            AutocorrelationProfile::compute(&[1, 2, 3, 4, 5], 5, CoefficientMethod::default()),
            Err(MRError::InsufficientData { max_lag: 5, len: 5 })
        );
        assert_eq!(
            AutocorrelationProfile::compute(&[1, 2, 3], 0, CoefficientMethod::default()),
            Err(MRError::InvalidMaxLag { max_lag: 0 })
        );
    }
}
