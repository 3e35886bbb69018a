//! covariate::models: the covariate-model trait and its variants.
//!
//! - [`covariate_model`]: the [`CovariateModel`] contract plus the shared
//!   likelihood engine, fit and query surface.
//! - [`norm_cov`], [`norm_cov_scale`], [`gev_cov`]: the three
//!   reparameterizations.
//! - [`model_internals`]: optimizer wiring and arity helpers.

pub mod covariate_model;
pub mod gev_cov;
pub mod model_internals;
pub mod norm_cov;
pub mod norm_cov_scale;

pub use self::covariate_model::CovariateModel;
pub use self::gev_cov::GevCov;
pub use self::norm_cov::NormCov;
pub use self::norm_cov_scale::NormCovScale;
