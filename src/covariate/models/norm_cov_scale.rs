//! NormCovScale: Normal distribution whose location and scale both scale
//! exponentially with the covariate.
//!
//! Parameter layout `θ = (loc0, scale0, a)`:
//! - `f(cov) = exp(a·cov / loc0)`
//! - `loc(cov) = loc0·f(cov)`, `scale(cov) = scale0·f(cov)`
//!
//! The ratio `scale / loc` is therefore constant across the covariate. The
//! transform is undefined at `loc0 = 0` and reports
//! [`NativeParams::Unsupported`] there, and whenever any implied scale is
//! non-positive or `NaN`.
use crate::{
    covariate::{
        core::{CovariateData, Family, NativeParams, Prior},
        errors::ModelResult,
        models::{covariate_model::CovariateModel, model_internals::unpack},
    },
    optimization::loglik_optimizer::Theta,
};
use ndarray::{ArrayView1, array};

#[derive(Debug, Clone, PartialEq)]
pub struct NormCovScale {
    data: CovariateData,
    prior: Prior,
}

impl NormCovScale {
    pub const PARAM_NAMES: [&'static str; 3] = ["loc0", "scale0", "a"];

    pub fn new(data: CovariateData) -> Self {
        NormCovScale { data, prior: Prior::Flat }
    }

    pub fn with_prior(data: CovariateData, prior: Prior) -> ModelResult<Self> {
        prior.validate_for(Self::PARAM_NAMES.len())?;
        Ok(NormCovScale { data, prior })
    }
}

impl CovariateModel for NormCovScale {
    fn data(&self) -> &CovariateData {
        &self.data
    }

    fn family(&self) -> Family {
        Family::Normal
    }

    fn param_names(&self) -> &'static [&'static str] {
        &Self::PARAM_NAMES
    }

    /// `[mean, std, 0]`. Zero-mean data makes this guess unsupported.
    fn initial_guess(&self) -> Theta {
        array![self.data.mean(), self.data.std(), 0.0]
    }

    fn transform(&self, theta: ArrayView1<f64>, cov: ArrayView1<f64>) -> NativeParams {
        let Some([loc0, scale0, a]) = unpack::<3>(theta) else {
            return NativeParams::Unsupported;
        };
        if loc0 == 0.0 {
            return NativeParams::Unsupported;
        }
        let factor = cov.mapv(|c| (a * c / loc0).exp());
        let scale = factor.mapv(|f| scale0 * f);
        if scale.iter().any(|&s| !(s > 0.0)) {
            return NativeParams::Unsupported;
        }
        NativeParams::Supported { shape: None, loc: factor.mapv(|f| loc0 * f), scale }
    }

    fn prior(&self) -> &Prior {
        &self.prior
    }
}
