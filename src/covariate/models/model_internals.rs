//! Covariate model internals: optimizer wiring and small shared helpers.
//!
//! Purpose
//! -------
//! Keep the glue between [`CovariateModel`] and the generic optimizer out of
//! the public trait: the [`ModelLikelihood`] wrapper that exposes a model as
//! a [`LogLikelihood`], fixed-arity unpacking of `θ` used by every
//! transform, and the evaluation loop behind the query surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`ModelLikelihood::check`] is the single gate before optimization: a
//!   start with the wrong arity, non-finite coordinates or `-∞`
//!   log-likelihood is rejected there.
//! - [`unpack`] never panics; any length other than `N` gives `None`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover arity handling in [`unpack`] and the start checks of
//!   [`ModelLikelihood`].
use crate::{
    covariate::{
        core::{Family, NativePoint},
        models::covariate_model::CovariateModel,
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Cost, LogLikelihood, Theta, validation::validate_theta0},
    },
};
use ndarray::{Array1, ArrayView1, aview1};

/// Exposes a [`CovariateModel`] as an optimizer [`LogLikelihood`].
pub struct ModelLikelihood<'a, M: CovariateModel + ?Sized> {
    model: &'a M,
}

impl<'a, M: CovariateModel + ?Sized> ModelLikelihood<'a, M> {
    pub fn new(model: &'a M) -> Self {
        Self { model }
    }
}

impl<'a, M: CovariateModel + ?Sized> LogLikelihood for ModelLikelihood<'a, M> {
    /// `loglike(θ)`, already NaN-free.
    fn value(&self, theta: &Theta) -> OptResult<Cost> {
        Ok(self.model.loglike(theta.view()))
    }

    /// Reject starts with the wrong arity, non-finite entries or no support.
    fn check(&self, theta: &Theta) -> OptResult<()> {
        validate_theta0(theta, self.model.n_params())?;
        let value = self.model.loglike(theta.view());
        if value == f64::NEG_INFINITY {
            return Err(OptError::InfeasibleStart { value });
        }
        Ok(())
    }
}

/// Copy `θ` into a fixed-size array when it has exactly `N` entries.
pub fn unpack<const N: usize>(theta: ArrayView1<f64>) -> Option<[f64; N]> {
    if theta.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, &v) in out.iter_mut().zip(theta.iter()) {
        *slot = v;
    }
    Some(out)
}

/// Evaluate `f` at each of `at` with the native point implied by `θ` at a
/// single covariate value; all-`NaN` when `θ` is unsupported.
pub fn query_native<M: CovariateModel + ?Sized>(
    model: &M, at: ArrayView1<f64>, theta: ArrayView1<f64>, cov: f64,
    f: fn(Family, f64, NativePoint) -> f64,
) -> Array1<f64> {
    let family = model.family();
    match model.transform(theta, aview1(&[cov])).point(0) {
        Some(point) => at.mapv(|v| f(family, v, point)),
        None => Array1::from_elem(at.len(), f64::NAN),
    }
}
