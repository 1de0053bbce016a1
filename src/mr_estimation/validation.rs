//! Precondition checks for MR estimation.
//!
//! Lag-range checks run before any arithmetic on the data. The variance
//! check needs the mean and lives with the coefficient computation in
//! [`autocorrelation`](super::autocorrelation).
use crate::mr_estimation::errors::{MRError, MRResult};

/// Validate `max_lag` against the series length.
///
/// # Errors
/// - [`MRError::InvalidMaxLag`] when `max_lag == 0`.
/// - [`MRError::InsufficientData`] when `max_lag >= len`: the last lag
///   would have no overlapping pair of observations.
pub fn validate_max_lag(max_lag: usize, len: usize) -> MRResult<()> {
    if max_lag == 0 {
        return Err(MRError::InvalidMaxLag { max_lag });
    }
    if max_lag >= len {
        return Err(MRError::InsufficientData { max_lag, len });
    }
    Ok(())
}

/// Validate a variance estimate used as a denominator.
///
/// # Errors
/// [`MRError::ZeroVariance`] unless `variance` is finite and `> 0`.
pub fn validate_variance(variance: f64) -> MRResult<()> {
    if !(variance.is_finite() && variance > 0.0) {
        return Err(MRError::ZeroVariance);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Cover each branch of `validate_max_lag`.
    //
    // Given
    // -----
    // - (0, 10), (10, 10), (11, 10), (9, 10).
    //
    // Expect
    // ------
    // - InvalidMaxLag, InsufficientData twice, then Ok.
    fn validate_max_lag_branches() {
        assert_eq!(validate_max_lag(0, 10), Err(MRError::InvalidMaxLag { max_lag: 0 }));
        assert_eq!(
            validate_max_lag(10, 10),
            Err(MRError::InsufficientData { max_lag: 10, len: 10 })
        );
        assert_eq!(
            validate_max_lag(11, 10),
            Err(MRError::InsufficientData { max_lag: 11, len: 10 })
        );
        assert_eq!(validate_max_lag(9, 10), Ok(()));
    }

    #[test]
    // Purpose
    // -------
    // Zero and NaN variances are degenerate.
    //
    // Given
    // -----
    // - 0.0, NaN and 2.5.
    //
    // Expect
    // ------
    // - ZeroVariance, ZeroVariance, Ok.
    fn validate_variance_rejects_degenerate() {
        assert_eq!(validate_variance(0.0), Err(MRError::ZeroVariance));
        assert_eq!(validate_variance(f64::NAN), Err(MRError::ZeroVariance));
        assert_eq!(validate_variance(2.5), Ok(()));
    }
}
