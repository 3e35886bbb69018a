//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`], [`Tolerances`] and [`SimplexSteps`]: configuration for
//!   the optimizer.
//! - [`OptimOutcome`]: normalized result returned by the high-level `maximize` API.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)`. The search is derivative-free, so no gradient is requested.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Theta,
        types::{DEFAULT_NONZERO_STEP, DEFAULT_TOL_COST, DEFAULT_ZERO_STEP},
        validation::{validate_theta_hat, validate_value, verify_simplex_step, verify_tol_cost},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
/// The implementor owns whatever data the likelihood is evaluated on.
///
/// Required:
/// - `value(&Theta) -> OptResult<Cost>`: evaluate `ℓ(θ)`. Returning `-∞`
///   for parameter sets outside the support is allowed and keeps the search
///   moving; `NaN` is rejected by the adapter.
/// - `check(&Theta) -> OptResult<()>`: validation hook to reject
///   obviously invalid starting points. Called once before optimization.
pub trait LogLikelihood {
    fn value(&self, theta: &Theta) -> OptResult<Cost>;
    fn check(&self, theta: &Theta) -> OptResult<()>;
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances`: stopping tolerance and iteration cap.
/// - `steps: SimplexSteps`: perturbations used to build the initial simplex.
/// - `verbose: bool`: if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
///
/// Default:
/// - `tols`: `tol_cost = 1e-5`, `max_iter = None` (200 per parameter)
/// - `steps`: 5 % of non-zero coordinates, `0.00025` for zero coordinates
/// - `verbose`: `false`
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub steps: SimplexSteps,
    pub verbose: bool,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// Validation of numeric fields is performed inside [`Tolerances::new`]
    /// and [`SimplexSteps::new`].
    pub fn new(tols: Tolerances, steps: SimplexSteps, verbose: bool) -> Self {
        Self { tols, steps, verbose }
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            steps: SimplexSteps::default(),
            verbose: false,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_cost`: terminate when the standard deviation of the cost values
///   over the simplex vertices falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations. `None` means
///   `200 × dim(θ)`.
///
/// At least one of the two must be provided (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if both are `None`.
    /// - [`OptError::InvalidTolCost`] for a non-finite or non-positive tolerance.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(tol_cost: Option<f64>, max_iter: Option<usize>) -> OptResult<Self> {
        if tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_cost, max_iter })
    }
}

/// Perturbations used to build the initial simplex around `θ₀`.
///
/// Vertex `k` copies `θ₀` and moves coordinate `k` to
/// `θ₀[k] · (1 + nonzero)` when it is non-zero, or to `zero` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexSteps {
    pub nonzero: f64,
    pub zero: f64,
}

impl SimplexSteps {
    pub fn new(nonzero: f64, zero: f64) -> OptResult<Self> {
        verify_simplex_step(nonzero)?;
        verify_simplex_step(zero)?;
        Ok(Self { nonzero, zero })
    }
}

impl Default for Tolerances {
    /// Cost tolerance `1e-5`; the iteration cap is left to the runner.
    fn default() -> Self {
        Self { tol_cost: Some(DEFAULT_TOL_COST), max_iter: None }
    }
}

impl Default for SimplexSteps {
    fn default() -> Self {
        Self { nonzero: DEFAULT_NONZERO_STEP, zero: DEFAULT_ZERO_STEP }
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` only when the solver met its tolerance.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// Hitting the iteration cap (or any other stop that is not the solver's
    /// own convergence criterion) reports `converged = false`.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: &TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let iterations = iterations as usize;
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals })
    }

    /// Turn a non-converged outcome into [`OptError::FitNotConverged`].
    pub fn into_converged(self) -> OptResult<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(OptError::FitNotConverged { status: self.status, iterations: self.iterations })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // `Tolerances::new` must reject configurations without any stopping rule.
    fn tolerances_require_a_stopping_rule() {
        assert_eq!(Tolerances::new(None, None), Err(OptError::NoTolerancesProvided));
        assert!(Tolerances::new(Some(1e-5), None).is_ok());
        assert!(Tolerances::new(None, Some(10)).is_ok());
    }

    #[test]
    fn tolerances_reject_bad_values() {
        assert!(matches!(Tolerances::new(Some(0.0), None), Err(OptError::InvalidTolCost { .. })));
        assert!(matches!(
            Tolerances::new(Some(f64::NAN), None),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(Tolerances::new(None, Some(0)), Err(OptError::InvalidMaxIter { .. })));
    }

    #[test]
    fn simplex_steps_reject_non_positive() {
        assert!(SimplexSteps::new(0.05, 0.00025).is_ok());
        assert!(matches!(SimplexSteps::new(-0.1, 0.1), Err(OptError::InvalidSimplexStep { .. })));
        assert!(matches!(SimplexSteps::new(0.1, 0.0), Err(OptError::InvalidSimplexStep { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Only a solver-declared convergence counts as converged; an iteration
    // cap is surfaced as a failure by `into_converged`.
    //
    // Given
    // -----
    // - Two outcomes with identical payloads but different termination reasons.
    //
    // Expect
    // ------
    // - `SolverConverged` → `converged = true`.
    // - `MaxItersReached` → `converged = false` and `FitNotConverged`.
    fn outcome_convergence_follows_termination_reason() {
        let ok = OptimOutcome::new(
            Some(array![1.0, 2.0]),
            -3.0,
            &TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
        )
        .expect("valid outcome");
        assert!(ok.converged);
        assert!(ok.into_converged().is_ok());

        let capped = OptimOutcome::new(
            Some(array![1.0, 2.0]),
            -3.0,
            &TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            400,
            FnEvalMap::new(),
        )
        .expect("valid outcome");
        assert!(!capped.converged);
        assert!(matches!(
            capped.into_converged(),
            Err(OptError::FitNotConverged { iterations: 400, .. })
        ));
    }

    #[test]
    fn outcome_rejects_missing_or_non_finite_estimates() {
        let status = TerminationStatus::Terminated(TerminationReason::SolverConverged);
        assert_eq!(
            OptimOutcome::new(None, 0.0, &status, 1, FnEvalMap::new()),
            Err(OptError::MissingThetaHat)
        );
        assert!(matches!(
            OptimOutcome::new(Some(array![f64::NAN]), 0.0, &status, 1, FnEvalMap::new()),
            Err(OptError::InvalidThetaHat { index: 0, .. })
        ));
        assert!(matches!(
            OptimOutcome::new(Some(array![1.0]), f64::NEG_INFINITY, &status, 1, FnEvalMap::new()),
            Err(OptError::NonFiniteCost { .. })
        ));
    }
}
