//! Exponential fit of the autocorrelation profile.
//!
//! Purpose
//! -------
//! Solve the nonlinear least-squares problem
//!
//! ```text
//! min_{A, m}  Σ_k (A · m^k − r_k)²
//! ```
//!
//! with the crate's L-BFGS minimizer and an analytic gradient, then attach
//! asymptotic standard errors.
//!
//! Key behaviors
//! -------------
//! - The optimizer works on `θ = (A, φ)` with `m = B · tanh(φ)`. The bound
//!   `B = min(2, 10^(100 / k_max))` keeps `m^k` finite at every trial point
//!   of the line search while still allowing `m > 1`.
//! - Starting points come from [`InitialGuess`]. `ProfileScan` profiles the
//!   amplitude out in closed form (`A(m) = Σ r_k m^k / Σ m^{2k}`) over a
//!   log-spaced grid of autocorrelation times and starts from the grid
//!   minimum. This matters for subsampled data, where `r_1 ≪ m`.
//! - A run that errors, stops without converging, or ends at an
//!   ill-conditioned solution becomes [`MRError::FitDivergence`]. See
//!   [`degeneracy`] for what counts as ill-conditioned.
//! - Standard errors use `s² = SSR / (K − 2)` and `Cov = s² (JᵀJ)⁻¹` in
//!   `(A, m)` coordinates; they are `None` for `K ≤ 2` or singular `JᵀJ`.
use crate::{
    mr_estimation::{
        autocorrelation::AutocorrelationProfile,
        errors::{MRError, MRResult},
        model::FitFunction,
        options::{InitialGuess, MROptions},
    },
    optimization::{
        errors::{OptError, OptResult},
        least_squares::{
            Cost, FitOptions, Grad, Objective, OptimOutcome, Theta, Tolerances, minimize,
        },
    },
};
use nalgebra::{Matrix2, Vector2};
use ndarray::{Array1, array};

/// Number of candidate autocorrelation times in the profile scan.
pub const PROFILE_SCAN_POINTS: usize = 512;

const PROFILE_SCAN_MIN_TAU: f64 = 0.1;
const PROFILE_SCAN_TAU_FACTOR: f64 = 100.0;
const MAX_BRANCHING_BOUND: f64 = 2.0;

/// Largest `|A|` accepted from a fit. Autocorrelations satisfy `|r_k| ≲ 1`,
/// so a larger amplitude only arises when `m^k` collapses within one lag.
pub const MAX_AMPLITUDE: f64 = 10.0;

/// Largest accepted ratio of a standard error to its parameter.
pub const MAX_RELATIVE_STDERR: f64 = 1.0;

const EDGE_TOLERANCE: f64 = 1e-6;

/// Lags, coefficients and the bound of the `m` reparameterization.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayData {
    lags: Array1<f64>,
    coefficients: Array1<f64>,
    bound: f64,
}

impl DecayData {
    pub fn from_profile(profile: &AutocorrelationProfile) -> Self {
        let lags = profile.lags_f64();
        let k_max = lags.iter().cloned().fold(1.0, f64::max);
        let bound = MAX_BRANCHING_BOUND.min(10f64.powf(100.0 / k_max));
        Self { lags, coefficients: profile.coefficients().clone(), bound }
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Map `(A, m)` to optimizer coordinates. `m` is clamped into the open
    /// interval `(−B, B)`.
    pub fn encode(&self, amplitude: f64, branching_ratio: f64) -> Theta {
        let edge = 1.0 - 1e-12;
        let ratio = (branching_ratio / self.bound).clamp(-edge, edge);
        array![amplitude, ratio.atanh()]
    }

    /// Map optimizer coordinates back to `(A, m)`.
    pub fn decode(&self, theta: &Theta) -> (f64, f64) {
        (theta[0], self.bound * theta[1].tanh())
    }
}

/// Residual sum of squares of `A · m^k` against the profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialDecayObjective;

impl Objective for ExponentialDecayObjective {
    type Data = DecayData;

    fn value(&self, theta: &Theta, data: &DecayData) -> OptResult<Cost> {
        let (a, m) = data.decode(theta);
        Ok(data
            .lags
            .iter()
            .zip(data.coefficients.iter())
            .map(|(&k, &r)| {
                let e = a * m.powf(k) - r;
                e * e
            })
            .sum())
    }

    fn check(&self, theta: &Theta, data: &DecayData) -> OptResult<()> {
        if theta.len() != 2 {
            return Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() });
        }
        if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(OptError::InvalidThetaInput { index, value });
        }
        if data.lags.is_empty() || data.lags.len() != data.coefficients.len() {
            return Err(OptError::InvalidData {
                reason: "lags and coefficients must be non-empty and of equal length",
            });
        }
        if data.coefficients.iter().any(|r| !r.is_finite()) {
            return Err(OptError::InvalidData { reason: "coefficients must be finite" });
        }
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &DecayData) -> OptResult<Grad> {
        let (a, m) = data.decode(theta);
        let t = theta[1].tanh();
        let dm_dphi = data.bound * (1.0 - t * t);

        let mut g_a = 0.0;
        let mut g_m = 0.0;
        for (&k, &r) in data.lags.iter().zip(data.coefficients.iter()) {
            let mk = m.powf(k);
            let e2 = 2.0 * (a * mk - r);
            g_a += e2 * mk;
            g_m += e2 * a * k * m.powf(k - 1.0);
        }
        Ok(array![g_a, g_m * dm_dphi])
    }
}

/// Result of a successful exponential fit.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialFit {
    pub fit: FitFunction,
    pub stderr: Option<(f64, f64)>,
    pub optim: OptimOutcome,
}

/// Fit `A · m^k` to `profile`.
///
/// # Errors
/// - [`MRError::InvalidOptions`] when `opts.fit` fails validation.
/// - [`MRError::FitDivergence`] (carrying `r_1`) when the optimizer errors,
///   stops without converging, or ends at a solution flagged by
///   [`degeneracy`].
pub fn fit_exponential(
    profile: &AutocorrelationProfile, opts: &MROptions,
) -> MRResult<ExponentialFit> {
    validate_fit_options(&opts.fit)?;
    let naive = profile.first_lag();
    let diverged =
        |reason: String| MRError::FitDivergence { naive_branching_ratio: naive, reason };

    let data = DecayData::from_profile(profile);
    let (a0, m0) = initial_guess(&data, opts.initial_guess);
    let theta0 = data.encode(a0, m0);

    let optim = minimize(&ExponentialDecayObjective, theta0, &data, &opts.fit)
        .map_err(|err| diverged(err.to_string()))?;
    if !optim.converged {
        return Err(diverged(format!("solver stopped without converging: {}", optim.status)));
    }
    let (a, m) = data.decode(&optim.theta_hat);
    let stderr = standard_errors(&data.lags, &data.coefficients, a, m);
    if let Some(reason) = degeneracy(&data, a, m, stderr) {
        return Err(diverged(reason));
    }
    Ok(ExponentialFit { fit: FitFunction::exponential(a, m), stderr, optim })
}

/// Reason a converged `(A, m)` is too ill-conditioned to report, or `None`.
///
/// A solution is ill-conditioned when any of these hold:
/// - a parameter is non-finite;
/// - `|m|` sits at the lower edge of the profile scan,
///   `exp(−1 / τ_min)`, where the decay collapses within one lag and only
///   `r_1` constrains the fit;
/// - `|m|` sits at the reparameterization bound `B`;
/// - `|A| >` [`MAX_AMPLITUDE`];
/// - with more than two lags, the standard errors are unavailable or one
///   of `σ_A / |A|`, `σ_m / |m|` exceeds [`MAX_RELATIVE_STDERR`].
pub fn degeneracy(
    data: &DecayData, amplitude: f64, branching_ratio: f64, stderr: Option<(f64, f64)>,
) -> Option<String> {
    let (a, m) = (amplitude, branching_ratio);
    if !(a.is_finite() && m.is_finite()) {
        return Some(format!("non-finite parameters A = {a}, m = {m}"));
    }
    let floor = (-1.0 / PROFILE_SCAN_MIN_TAU).exp();
    if m.abs() <= floor * (1.0 + EDGE_TOLERANCE) {
        return Some(format!("m = {m} collapses within one lag (|m| <= {floor:e})"));
    }
    if m.abs() >= data.bound * (1.0 - EDGE_TOLERANCE) {
        return Some(format!("m = {m} is at the bound {}", data.bound));
    }
    if a.abs() > MAX_AMPLITUDE {
        return Some(format!("amplitude A = {a} exceeds {MAX_AMPLITUDE}"));
    }
    if data.lags.len() <= 2 {
        return None;
    }
    let Some((sigma_a, sigma_m)) = stderr else {
        return Some(format!("singular normal matrix at A = {a}, m = {m}"));
    };
    let (rel_a, rel_m) = (sigma_a / a.abs(), sigma_m / m.abs());
    if !(rel_a <= MAX_RELATIVE_STDERR && rel_m <= MAX_RELATIVE_STDERR) {
        return Some(format!(
            "relative standard errors too large: σ_A/|A| = {rel_a}, σ_m/|m| = {rel_m}"
        ));
    }
    None
}

/// Starting point `(A₀, m₀)` for the fit.
pub fn initial_guess(data: &DecayData, guess: InitialGuess) -> (f64, f64) {
    match guess {
        InitialGuess::FirstLag => {
            let r1 = data.coefficients[0];
            (r1, r1)
        }
        InitialGuess::ProfileScan => profile_scan(&data.lags, &data.coefficients),
    }
}

/// Grid search over `m = exp(−1/τ)` with the amplitude profiled out.
///
/// For fixed `m`, the optimal amplitude and residual are
/// `A = S_rm / S_mm` and `SSR = Σ r² − S_rm² / S_mm`, with
/// `S_rm = Σ r_k m^k` and `S_mm = Σ m^{2k}`.
pub fn profile_scan(lags: &Array1<f64>, coefficients: &Array1<f64>) -> (f64, f64) {
    let k_max = lags.iter().cloned().fold(1.0, f64::max);
    let tau_max = PROFILE_SCAN_TAU_FACTOR * k_max;
    let log_span = (tau_max / PROFILE_SCAN_MIN_TAU).ln();
    let s_rr: f64 = coefficients.iter().map(|r| r * r).sum();

    let mut best = (coefficients[0], coefficients[0]);
    let mut best_ssr = f64::INFINITY;
    for i in 0..PROFILE_SCAN_POINTS {
        let frac = i as f64 / (PROFILE_SCAN_POINTS - 1) as f64;
        let tau = PROFILE_SCAN_MIN_TAU * (frac * log_span).exp();
        let m = (-1.0 / tau).exp();

        let mut s_rm = 0.0;
        let mut s_mm = 0.0;
        for (&k, &r) in lags.iter().zip(coefficients.iter()) {
            let mk = m.powf(k);
            s_rm += r * mk;
            s_mm += mk * mk;
        }
        if !(s_mm > 0.0) {
            continue;
        }
        let ssr = s_rr - s_rm * s_rm / s_mm;
        if ssr < best_ssr {
            best_ssr = ssr;
            best = (s_rm / s_mm, m);
        }
    }
    best
}

/// Asymptotic standard errors `(σ_A, σ_m)` of the least-squares fit.
pub fn standard_errors(
    lags: &Array1<f64>, coefficients: &Array1<f64>, amplitude: f64, branching_ratio: f64,
) -> Option<(f64, f64)> {
    let n_lags = lags.len();
    if n_lags <= 2 {
        return None;
    }
    let (a, m) = (amplitude, branching_ratio);
    let mut jtj = Matrix2::<f64>::zeros();
    let mut ssr = 0.0;
    for (&k, &r) in lags.iter().zip(coefficients.iter()) {
        let mk = m.powf(k);
        let res = a * mk - r;
        ssr += res * res;
        let row = Vector2::new(mk, a * k * m.powf(k - 1.0));
        jtj += row * row.transpose();
    }
    let s2 = ssr / (n_lags - 2) as f64;
    let cov = jtj.try_inverse()? * s2;
    let (var_a, var_m) = (cov[(0, 0)], cov[(1, 1)]);
    if var_a.is_finite() && var_m.is_finite() && var_a >= 0.0 && var_m >= 0.0 {
        Some((var_a.sqrt(), var_m.sqrt()))
    } else {
        None
    }
}

fn validate_fit_options(fit: &FitOptions) -> MRResult<()> {
    let tols = Tolerances::new(fit.tols.tol_grad, fit.tols.tol_cost, fit.tols.max_iter)?;
    FitOptions::new(tols, fit.line_searcher, fit.verbose, fit.lbfgs_mem)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use crate::optimization::least_squares::LineSearcher;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Noiseless profiles with known (A, m), gradient correctness, the profile
    // scan and the standard-error edge cases. Stochastic profiles are covered
    // by the estimator tests.
    // -------------------------------------------------------------------------

    fn exact_profile(amplitude: f64, m: f64, k_max: usize) -> AutocorrelationProfile {
        AutocorrelationProfile::from_coefficients(
            (1..=k_max).map(|k| amplitude * m.powi(k as i32)).collect(),
        )
        .expect("k_max >= 1")
    }

    #[test]
    // Purpose
    // -------
    // A noiseless profile is fitted exactly from either starting rule.
    //
    // Given
    // -----
    // - r_k = 0.8 · 0.9^k for k = 1..=50.
    //
    // Expect
    // ------
    // - A ≈ 0.8 and m ≈ 0.9 for FirstLag and ProfileScan.
    fn fit_recovers_noiseless_decay() {
        let profile = exact_profile(0.8, 0.9, 50);
        for guess in [InitialGuess::FirstLag, InitialGuess::ProfileScan] {
            // Arrange
            let opts = MROptions { initial_guess: guess, ..MROptions::default() };

            // Act
            let out = fit_exponential(&profile, &opts).expect("noiseless fit converges");

            // Assert
            let (a, m) = out.fit.params();
            assert_abs_diff_eq!(a, 0.8, epsilon = 1e-4);
            assert_abs_diff_eq!(m, 0.9, epsilon = 1e-5);
            assert!(out.optim.converged);
        }
    }

    #[test]
    // Purpose
    // -------
    // The analytic gradient agrees with central differences in optimizer
    // coordinates.
    //
    // Given
    // -----
    // - The exact profile for (0.5, 0.95) evaluated at θ for (0.4, 0.9).
    //
    // Expect
    // ------
    // - Relative agreement within 1e-5 in both components.
    fn analytic_gradient_matches_finite_differences() {
        // Arrange
        let data = DecayData::from_profile(&exact_profile(0.5, 0.95, 40));
        let theta = data.encode(0.4, 0.9);
        let obj = ExponentialDecayObjective;
        let h = 1e-6;

        // Act
        let g = obj.grad(&theta, &data).expect("analytic gradient");
        let mut fd = Array1::zeros(2);
        for i in 0..2 {
            let mut up = theta.clone();
            let mut down = theta.clone();
            up[i] += h;
            down[i] -= h;
            let c_up = obj.value(&up, &data).expect("finite");
            let c_down = obj.value(&down, &data).expect("finite");
            fd[i] = (c_up - c_down) / (2.0 * h);
        }

        // Assert
        for i in 0..2 {
            assert_relative_eq!(g[i], fd[i], max_relative = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // The profile scan lands near the true m even when r_1 is far from it.
    //
    // Given
    // -----
    // - r_k = 0.01 · 0.98^k for k = 1..=150 (subsampling-like amplitude).
    //
    // Expect
    // ------
    // - m₀ within 0.01 of 0.98 and A₀ within 10% of 0.01.
    fn profile_scan_ignores_small_amplitude() {
        let data = DecayData::from_profile(&exact_profile(0.01, 0.98, 150));

        let (a0, m0) = initial_guess(&data, InitialGuess::ProfileScan);

        assert!((m0 - 0.98).abs() < 0.01, "m0 = {m0}");
        assert!((a0 - 0.01).abs() < 1e-3, "a0 = {a0}");
    }

    #[test]
    // Purpose
    // -------
    // Standard errors need more than two lags.
    //
    // Given
    // -----
    // - Two lags, then 30 lags of a slightly perturbed decay.
    //
    // Expect
    // ------
    // - `None`, then finite non-negative errors.
    fn standard_errors_require_three_lags() {
        let lags2 = array![1.0, 2.0];
        assert_eq!(standard_errors(&lags2, &array![0.9, 0.81], 1.0, 0.9), None);

        let lags: Array1<f64> = (1..=30).map(|k| k as f64).collect();
        let coefs: Array1<f64> = lags
            .iter()
            .enumerate()
            .map(|(i, &k)| 0.9_f64.powf(k) + if i % 2 == 0 { 1e-3 } else { -1e-3 })
            .collect();
        let (sa, sm) = standard_errors(&lags, &coefs, 1.0, 0.9).expect("regular design");
        assert!(sa.is_finite() && sa > 0.0);
        assert!(sm.is_finite() && sm > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Invalid optimizer options are reported as such, not as divergence.
    //
    // Given
    // -----
    // - `lbfgs_mem = Some(0)` written directly into the public field.
    //
    // Expect
    // ------
    // - `MRError::InvalidOptions(InvalidLBFGSMem)`.
    fn invalid_fit_options_are_rejected() {
        let mut opts = MROptions::default();
        opts.fit.lbfgs_mem = Some(0);
        opts.fit.line_searcher = LineSearcher::HagerZhang;

        let err = fit_exponential(&exact_profile(1.0, 0.5, 10), &opts).expect_err("invalid mem");

        assert!(matches!(err, MRError::InvalidOptions(OptError::InvalidLBFGSMem { .. })));
    }

    #[test]
    // Purpose
    // -------
    // An exhausted iteration budget is a divergence and keeps r_1.
    //
    // Given
    // -----
    // - FirstLag start far from the optimum and `max_iter = 1`.
    //
    // Expect
    // ------
    // - `FitDivergence` whose naive ratio equals r_1.
    fn iteration_budget_exhaustion_is_divergence() {
        // Arrange
        let profile = exact_profile(0.05, 0.97, 100);
        let tols = Tolerances::new(Some(1e-14), Some(1e-20), Some(1)).expect("valid");
        let fit = FitOptions::new(tols, LineSearcher::MoreThuente, false, None).expect("valid");
        let opts = MROptions { initial_guess: InitialGuess::FirstLag, fit, ..MROptions::default() };

        // Act
        let err = fit_exponential(&profile, &opts).expect_err("one iteration cannot converge");

        // Assert
        match err {
            MRError::FitDivergence { naive_branching_ratio, .. } => {
                assert_eq!(naive_branching_ratio, profile.first_lag());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // A profile carried by r_1 alone is reported as a failed fit instead of
    // a spurious estimate.
    //
    // Given
    // -----
    // - r_1 = 0.3 and r_k = 0.002 · sin(1.7 k) for k = 2..=150, the shape of
    //   a sparse subsampled series whose decay is buried in noise.
    //
    // Expect
    // ------
    // - `FitDivergence` whose naive ratio is 0.3.
    fn spike_profile_is_divergence() {
        // Arrange
        let coefficients: Array1<f64> = (1..=150)
            .map(|k| if k == 1 { 0.3 } else { 0.002 * (1.7 * k as f64).sin() })
            .collect();
        let profile = AutocorrelationProfile::from_coefficients(coefficients).expect("non-empty");

        // Act
        let err = fit_exponential(&profile, &MROptions::default()).expect_err("ill-conditioned");

        // Assert
        match err {
            MRError::FitDivergence { naive_branching_ratio, .. } => {
                assert_eq!(naive_branching_ratio, 0.3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Each conditioning rule flags its own failure and leaves a regular
    // solution alone.
    //
    // Given
    // -----
    // - 150 lags (bound B = 2).
    // - A = 664.9, m = 4.54e-5 with σ = (4.5e6, 0.306): scan floor.
    // - m just inside B; A = 50 at m = 0.9; σ_m = 2 at m = 0.9; no σ.
    // - A = 0.01, m = 0.98, σ = (0.003, 0.008).
    //
    // Expect
    // ------
    // - `Some(reason)` for every flagged case, `None` for the regular one.
    fn degeneracy_flags_ill_conditioned_solutions() {
        let data = DecayData::from_profile(&exact_profile(0.01, 0.98, 150));
        let regular = Some((0.003, 0.008));

        assert!(degeneracy(&data, 664.9, 4.54e-5, Some((4.5e6, 0.306))).is_some());
        assert!(degeneracy(&data, 0.01, data.bound() * (1.0 - 1e-9), regular).is_some());
        assert!(degeneracy(&data, 50.0, 0.9, regular).is_some());
        assert!(degeneracy(&data, 0.01, 0.9, Some((0.003, 2.0))).is_some());
        assert!(degeneracy(&data, 0.01, 0.9, None).is_some());
        assert!(degeneracy(&data, f64::NAN, 0.9, regular).is_some());
        assert_eq!(degeneracy(&data, 0.01, 0.98, regular), None);
    }
}
