//! loglik_optimizer: argmin-powered, derivative-free log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)`. Callers implement a single trait,
//! [`LogLikelihood`], and invoke [`maximize`] to run a Nelder–Mead simplex
//! search with configurable tolerances and simplex geometry.
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied log-likelihoods `ℓ(θ)` into Argmin-compatible
//!   cost functions `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`].
//! - Expose a single, user-facing entrypoint [`maximize`] that:
//!   - validates the initial guess with [`LogLikelihood::check`],
//!   - builds the initial simplex via [`builders`],
//!   - executes the solver via [`run::run_nelder_mead`], and
//!   - normalizes results into an [`OptimOutcome`].
//! - Centralize optimizer configuration ([`Tolerances`], [`MLEOptions`]) and
//!   validation logic ([`validation`]) so downstream code can assume sane,
//!   finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** a log-likelihood `ℓ(θ)` by minimizing
//!   a cost `c(θ) = -ℓ(θ)`; user code implements `ℓ(θ)`, **never** the cost.
//! - `ℓ(θ) = -∞` is a legal answer for parameters outside the support and
//!   becomes a `+∞` cost; `NaN` is an error.
//! - Configuration types are validated on construction and treated as
//!   internally consistent by the solver layer.
//!
//! Conventions
//! -----------
//! - Parameters are [`Theta`] (`Array1<f64>`) in the model's own natural
//!   coordinates; the simplex method needs no reparametrization.
//! - All user-facing diagnostics (including [`OptimOutcome::value`]) are
//!   expressed in terms of the log-likelihood `ℓ`.
//! - Errors bubble up as [`OptResult<T>`](crate::optimization::errors::OptResult);
//!   this module and its children never intentionally panic or use `unsafe`.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign conventions in [`adapter`], simplex
//!   construction in [`builders`], end-to-end toy problems in [`api`], and
//!   configuration and outcome invariants in [`traits`].
//! - Integration tests exercise [`maximize`] implicitly by fitting the
//!   covariate models.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LogLikelihood, MLEOptions, OptimOutcome, SimplexSteps, Tolerances};
pub use self::types::{Cost, FnEvalMap, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LogLikelihood, MLEOptions, OptimOutcome, SimplexSteps, Tolerances};
    pub use super::types::{Cost, Theta};
}
