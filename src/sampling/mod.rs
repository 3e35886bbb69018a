//! sampling: posterior exploration by affine-invariant ensemble MCMC.
//!
//! Purpose
//! -------
//! Sample the posterior of a fitted [`CovariateModel`](crate::covariate::CovariateModel)
//! and summarize the resulting marginals.
//!
//! Key behaviors
//! -------------
//! - [`ensemble`] implements the stretch-move sampler ([`EnsembleSampler`])
//!   over any `Fn(ArrayView1<f64>) -> f64 + Sync` log-density.
//! - [`init`] scatters walkers around a point estimate ([`sample_ball`]).
//! - [`driver`] runs the fit / ball / burn-in / reset / production pipeline
//!   ([`run_mcmc`]) configured by [`McmcOptions`] from [`options`].
//! - [`summary`] reports median and credible bounds ([`param_range`],
//!   [`fmt_param_range`]).
//!
//! Conventions
//! -----------
//! - Chains are `(steps, walkers, params)`; flattened chains are step-major.
//! - Errors are [`SamplingError`]; optimizer failures are wrapped as
//!   [`SamplingError::Fit`].

pub mod driver;
pub mod ensemble;
pub mod errors;
pub mod init;
pub mod options;
pub mod summary;

#[allow(deprecated)]
pub use self::driver::glm_mcmc;
pub use self::driver::{PosteriorEnsemble, run_mcmc};
pub use self::ensemble::{EnsembleSampler, StretchMove};
pub use self::errors::{SamplingError, SamplingResult};
pub use self::init::sample_ball;
pub use self::options::McmcOptions;
pub use self::summary::{fmt_param_range, param_range};

pub mod prelude {
    pub use super::driver::{PosteriorEnsemble, run_mcmc};
    pub use super::errors::{SamplingError, SamplingResult};
    pub use super::options::McmcOptions;
    pub use super::summary::{fmt_param_range, param_range};
}
