//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-likelihood `ℓ(θ)` into a *minimization*
//! problem by defining the cost as `c(θ) = -ℓ(θ)`. Nelder–Mead only ever asks
//! for costs, so no gradient is wired here.
use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::LogLikelihood,
        types::{Cost, Theta},
    },
};
use argmin::core::{CostFunction, Error};

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction`.
///
/// `CostFunction::cost` returns `-ℓ(θ)`. A log-likelihood of `-∞` becomes a
/// cost of `+∞`, which the simplex treats as the worst possible vertex.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood + ?Sized> {
    pub f: &'a F,
}

impl<'a, F: LogLikelihood + ?Sized> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the user’s `value` via `?`.
    /// - Returns `NonFiniteCost` when the log-likelihood is `NaN` or `+∞`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta)?;
        if output.is_nan() || output == f64::INFINITY {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood + ?Sized> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood`.
    pub fn new(f: &'a F) -> Self {
        Self { f }
    }
}
