//! High-level entry point for minimizing a user-provided `Objective`.
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the model in an `ArgMinAdapter`, and delegates the run to
//! `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    least_squares::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{FitOptions, LineSearcher, Objective},
    },
};

/// Minimize an objective `c(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Builds an L-BFGS solver according to `opts.line_searcher`.
/// - Calls `run_lbfgs`, which configures the executor and returns an
///   `OptimOutcome`.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates runtime errors from `run_lbfgs` (e.g., line search failures).
///
/// # Example
/// ```
/// use ndarray::array;
/// use mr_estimator::optimization::{
///     errors::OptResult,
///     least_squares::{minimize, FitOptions, Objective, Theta},
/// };
///
/// struct Bowl;
/// impl Objective for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(theta.iter().map(|t| (t - 1.0).powi(2)).sum())
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.0, 2.5], &(), &FitOptions::default())?;
/// assert!((out.theta_hat[0] - 1.0).abs() < 1e-4);
/// # Ok::<(), mr_estimator::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &FitOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        least_squares::{Grad, Tolerances},
    };
    use ndarray::array;

    // Rosenbrock-like valley with a known minimum at (1, 1).
    struct Valley;

    impl Objective for Valley {
        type Data = f64;

        fn value(&self, theta: &Theta, scale: &f64) -> OptResult<f64> {
            let (x, y) = (theta[0], theta[1]);
            Ok((1.0 - x).powi(2) + scale * (y - x * x).powi(2))
        }

        fn check(&self, theta: &Theta, _: &f64) -> OptResult<()> {
            if theta.len() != 2 {
                return Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() });
            }
            Ok(())
        }

        fn grad(&self, theta: &Theta, scale: &f64) -> OptResult<Grad> {
            let (x, y) = (theta[0], theta[1]);
            Ok(array![
                -2.0 * (1.0 - x) - 4.0 * scale * x * (y - x * x),
                2.0 * scale * (y - x * x)
            ])
        }
    }

    #[test]
    // Purpose
    // -------
    // Both line searches drive a smooth 2-D valley to its minimum.
    //
    // Given
    // -----
    // - The valley with scale 2 and start (−0.5, 0.5).
    //
    // Expect
    // ------
    // - `converged` and θ̂ within 1e-4 of (1, 1).
    fn minimize_converges_with_both_line_searches() {
        for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            // Arrange
            let tols = Tolerances::new(Some(1e-10), Some(1e-16), Some(1000)).expect("valid");
            let opts = FitOptions::new(tols, ls, false, None).expect("valid");

            // Act
            let out = minimize(&Valley, array![-0.5, 0.5], &2.0, &opts)
                .expect("minimization should succeed");

            // Assert
            assert!(out.converged, "{ls:?} did not converge: {}", out.status);
            assert!((out.theta_hat[0] - 1.0).abs() < 1e-4, "{ls:?}: {:?}", out.theta_hat);
            assert!((out.theta_hat[1] - 1.0).abs() < 1e-4, "{ls:?}: {:?}", out.theta_hat);
            assert!(out.value < 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // `check` runs before any solver work.
    //
    // Given
    // -----
    // - A 3-element start vector for a 2-parameter objective.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` is returned.
    fn minimize_rejects_invalid_start() {
        let err = minimize(&Valley, array![0.0, 0.0, 0.0], &1.0, &FitOptions::default())
            .expect_err("check should reject the start vector");
        assert_eq!(err, OptError::ThetaLengthMismatch { expected: 2, actual: 3 });
    }
}
