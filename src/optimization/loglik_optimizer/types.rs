//! loglik_optimizer::types: shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! log-likelihood optimizer, so the rest of the optimization code stays
//! agnostic to `ndarray` and Argmin generics.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors and scalar costs
//!   (`Theta`, `Cost`).
//! - Provide a standard map type for Argmin function-evaluation counters
//!   (`FnEvalMap`).
//! - Expose the pre-wired Nelder–Mead solver alias and its Argmin state.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors are `ndarray::Array1<f64>`.
//! - `Cost` is the negative log-likelihood; higher layers flip signs.
//!
//! Testing notes
//! -------------
//! - Type aliases and constants only; exercised by the builder and runner
//!   tests.
use argmin::{core::IterState, solver::neldermead::NelderMead};
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ` for log-likelihood optimization.
pub type Theta = Array1<f64>;

/// Scalar objective value used by the optimizer.
///
/// In this crate, this is the cost `c(θ) = -ℓ(θ)` derived from a
/// log-likelihood `ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Derivative-free simplex solver over the crate’s numeric types.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;

/// Argmin iteration state used by [`NelderMeadSolver`] (no gradient,
/// Jacobian, Hessian or residuals).
pub type SimplexState = IterState<Theta, (), (), (), (), Cost>;

/// Relative perturbation applied to non-zero coordinates when building
/// the initial simplex.
pub const DEFAULT_NONZERO_STEP: f64 = 0.05;

/// Absolute perturbation applied to zero coordinates when building the
/// initial simplex.
pub const DEFAULT_ZERO_STEP: f64 = 0.00025;

/// Iteration budget per free parameter when no explicit `max_iter` is set.
pub const DEFAULT_ITER_PER_PARAM: usize = 200;

/// Default stopping tolerance on the standard deviation of simplex costs.
pub const DEFAULT_TOL_COST: f64 = 1e-5;
