//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! This validates the start, builds a Nelder–Mead simplex around it, wraps
//! the model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`), and delegates
//! the run to `run_nelder_mead`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::build_nelder_mead,
        run::run_nelder_mead,
        traits::{LogLikelihood, MLEOptions},
    },
};

/// Maximize a log-likelihood `ℓ(θ)` with the Nelder–Mead simplex method.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0)`.
/// - Builds the initial simplex from `theta0` and `opts.steps`.
/// - Runs the solver and returns an `OptimOutcome`. The outcome is returned
///   whether or not the tolerance was met; `converged` reports which.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_nelder_mead`.
/// - Propagates runtime errors from `run_nelder_mead`.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_distcov::optimization::errors::OptResult;
/// use rust_distcov::optimization::loglik_optimizer::{
///     maximize, LogLikelihood, MLEOptions, Theta,
/// };
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     fn value(&self, theta: &Theta) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, &array![0.1, -0.2, 0.3], &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_distcov::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood + ?Sized>(
    f: &F, theta0: &Theta, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(theta0)?;
    let solver = build_nelder_mead(theta0, opts)?;
    let problem = ArgMinAdapter::new(f);
    run_nelder_mead(theta0, opts, problem, solver)
}
