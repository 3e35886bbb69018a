//! loglik_optimizer::builders: Nelder–Mead solver construction helpers.
//!
//! Purpose
//! -------
//! Build the derivative-free simplex solver used by the log-likelihood
//! optimizer. These helpers hide Argmin’s generic wiring and apply
//! crate-level options (stopping tolerance, simplex perturbations) so that
//! higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct the `dim + 1` initial simplex vertices around `θ₀`
//!   ([`initial_simplex`]).
//! - Apply the optional cost standard-deviation tolerance from
//!   [`MLEOptions`].
//! - Leave `max_iters` to the runner/executor layer.
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ₀` has already been validated as finite and non-empty.
//! - Any invalid tolerance passed into Argmin’s `with_sd_tolerance` is
//!   surfaced as an [`OptError`](crate::optimization::errors::OptError)
//!   via the crate’s `From<Error>` implementation.
//!
//! Testing notes
//! -------------
//! - Unit tests verify vertex placement for zero and non-zero coordinates
//!   and that the builder accepts default options.
use argmin::solver::neldermead::NelderMead;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::{MLEOptions, SimplexSteps},
        types::{NelderMeadSolver, Theta},
    },
};

/// build_nelder_mead: construct a Nelder–Mead solver around `theta0`.
///
/// Parameters
/// ----------
/// - `theta0`: starting point; becomes the first simplex vertex.
/// - `opts`: optimizer options; `opts.tols.tol_cost` (if any) is applied as
///   the simplex cost standard-deviation tolerance and `opts.steps` shapes
///   the remaining vertices.
///
/// Errors
/// ------
/// - Propagates any Argmin error raised by `with_sd_tolerance`.
pub fn build_nelder_mead(theta0: &Theta, opts: &MLEOptions) -> OptResult<NelderMeadSolver> {
    let mut solver = NelderMead::new(initial_simplex(theta0, &opts.steps));
    if let Some(tol) = opts.tols.tol_cost {
        solver = solver.with_sd_tolerance(tol)?;
    }
    Ok(solver)
}

/// Initial simplex: `θ₀` plus one vertex per coordinate.
///
/// Vertex `k + 1` moves coordinate `k` to `θ₀[k]·(1 + steps.nonzero)` when
/// `θ₀[k] ≠ 0` and to `steps.zero` otherwise.
pub fn initial_simplex(theta0: &Theta, steps: &SimplexSteps) -> Vec<Theta> {
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for k in 0..theta0.len() {
        let mut vertex = theta0.clone();
        vertex[k] = if vertex[k] != 0.0 { vertex[k] * (1.0 + steps.nonzero) } else { steps.zero };
        vertices.push(vertex);
    }
    vertices
}
