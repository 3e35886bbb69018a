//! Execution helper that runs the `argmin` Nelder–Mead solver on a
//! log-likelihood problem and returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
        types::{DEFAULT_ITER_PER_PARAM, NelderMeadSolver},
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, State};

/// Run the simplex search for a log-likelihood problem.
///
/// Wires up:
/// - the user model via [`ArgMinAdapter`],
/// - a fully constructed [`NelderMeadSolver`] whose simplex already
///   contains `theta0`,
/// - optional observers (behind the `obs_slog` feature),
/// - `max_iters`, defaulting to `200 × dim(θ)`,
///
/// then executes the solver and converts the result into [`OptimOutcome`].
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a terminal
/// slog observer is attached with `ObserverMode::Always` and ℓ(θ₀) is printed
/// before the first iteration.
///
/// # Errors
/// - Propagates any `argmin` runtime error (including `OptError`s raised in
///   the cost function) via the crate’s `From<argmin::core::Error>`.
/// - Propagates validation errors encountered when constructing
///   [`OptimOutcome`].
pub fn run_nelder_mead<F>(
    theta0: &Theta, opts: &MLEOptions, problem: ArgMinAdapter<'_, F>, solver: NelderMeadSolver,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood + ?Sized,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let ll0 = -problem.cost(theta0)?;
        eprintln!("init: ell(theta0) = {ll0:.6}");
    }
    let max_iter = opts.tols.max_iter.unwrap_or(DEFAULT_ITER_PER_PARAM * theta0.len().max(1));
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        &termination,
        iterations,
        function_counts,
    )
}
