//! covariate: distributions whose parameters depend on an external covariate.
//!
//! Purpose
//! -------
//! Bundle the data containers, base families, covariate reparameterizations
//! and the likelihood engine under a single namespace. This is the surface
//! the MCMC driver and the Python bindings depend on.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds validated data ([`CovariateData`]), the base families
//!   ([`Family`]), the tagged native-parameter result ([`NativeParams`]) and
//!   the prior ([`Prior`]).
//! - [`models`] defines [`CovariateModel`] and the variants [`NormCov`],
//!   [`NormCovScale`] and [`GevCov`].
//! - [`errors`] carries [`ModelError`] for construction-time failures.
//!
//! Invariants & assumptions
//! ------------------------
//! - Data and covariate are aligned, non-empty and finite once bound.
//! - Likelihood evaluation never fails and never yields `NaN`; parameter
//!   sets outside the support score `-∞`.
//!
//! Conventions
//! -----------
//! - One scalar covariate per observation; no covariate preprocessing.
//! - Fitting errors surface as
//!   [`OptError`](crate::optimization::errors::OptError), construction
//!   errors as [`ModelError`].

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{CovariateData, Family, NativeParams, NativePoint, Prior};
pub use self::errors::{ModelError, ModelResult};
pub use self::models::{CovariateModel, GevCov, NormCov, NormCovScale};

pub mod prelude {
    pub use super::core::{CovariateData, Family, NativeParams, Prior};
    pub use super::errors::{ModelError, ModelResult};
    pub use super::models::{CovariateModel, GevCov, NormCov, NormCovScale};
}
