//! Fit functions for the autocorrelation profile.
//!
//! The MR estimator models `r_k = A · m^k`. [`FitFunction`] is a tagged
//! variant so further decay shapes can be added without changing the
//! estimator's result type; evaluation is pure.
use ndarray::Array1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitFunction {
    /// `r_k = amplitude · branching_ratio^k`.
    ExponentialDecay { amplitude: f64, branching_ratio: f64 },
}

impl FitFunction {
    pub fn exponential(amplitude: f64, branching_ratio: f64) -> Self {
        FitFunction::ExponentialDecay { amplitude, branching_ratio }
    }

    /// Evaluate at lag `k`.
    pub fn eval(&self, k: f64) -> f64 {
        match *self {
            FitFunction::ExponentialDecay { amplitude, branching_ratio } => {
                amplitude * branching_ratio.powf(k)
            }
        }
    }

    pub fn eval_lags(&self, lags: &[usize]) -> Array1<f64> {
        lags.iter().map(|&k| self.eval(k as f64)).collect()
    }

    /// `(A, m)`.
    pub fn params(&self) -> (f64, f64) {
        match *self {
            FitFunction::ExponentialDecay { amplitude, branching_ratio } => {
                (amplitude, branching_ratio)
            }
        }
    }

    pub fn branching_ratio(&self) -> f64 {
        self.params().1
    }

    /// Autocorrelation time `τ = −1 / ln m` in time steps.
    ///
    /// Only defined for `0 < m < 1`; returns `NaN` otherwise.
    pub fn autocorrelation_time(&self) -> f64 {
        let m = self.branching_ratio();
        if m > 0.0 && m < 1.0 { -1.0 / m.ln() } else { f64::NAN }
    }
}
