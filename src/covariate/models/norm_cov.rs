//! NormCov: Normal distribution whose location shifts linearly with the covariate.
//!
//! Parameter layout `θ = (b0, b1, scale)`:
//! - `loc(cov) = b0 + b1·cov`
//! - `scale` is constant.
//!
//! The scale is not sign-checked in the transform; a non-positive scale is
//! rejected by the Normal density itself and collapses to `-∞` in the
//! likelihood.
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
pub struct NormCov {
    data: CovariateData,
    prior: Prior,
}

impl NormCov {
    pub const PARAM_NAMES: [&'static str; 3] = ["b0", "b1", "scale"];

    /// Model with a flat prior.
    pub fn new(data: CovariateData) -> Self {
        NormCov { data, prior: Prior::Flat }
    }

    /// Model with an explicit prior.
    ///
    /// # Errors
    /// `ModelError::InvalidPriorIndex` if the prior refers to a coordinate
    /// beyond the three parameters.
    pub fn with_prior(data: CovariateData, prior: Prior) -> ModelResult<Self> {
        prior.validate_for(Self::PARAM_NAMES.len())?;
        Ok(NormCov { data, prior })
    }
}

impl CovariateModel for NormCov {
    fn data(&self) -> &CovariateData {
        &self.data
    }

    fn family(&self) -> Family {
        Family::Normal
    }

    fn param_names(&self) -> &'static [&'static str] {
        &Self::PARAM_NAMES
    }

    /// `[mean, 0, std]`.
    fn initial_guess(&self) -> Theta {
        array![self.data.mean(), 0.0, self.data.std()]
    }

    fn transform(&self, theta: ArrayView1<f64>, cov: ArrayView1<f64>) -> NativeParams {
        match unpack::<3>(theta) {
            Some([b0, b1, scale]) => NativeParams::Supported {
                shape: None,
                loc: cov.mapv(|c| b0 + b1 * c),
                scale: array![scale],
            },
            None => NativeParams::Unsupported,
        }
    }

    fn prior(&self) -> &Prior {
        &self.prior
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covariate::errors::ModelError;
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::{Distribution, Normal};

    fn model(values: Array1<f64>, cov: Array1<f64>) -> NormCov {
        NormCov::new(CovariateData::new(values, cov).expect("valid data"))
    }

    #[test]
    fn transform_shifts_location_linearly() {
        let m = model(array![0.0, 0.0], array![0.0, 1.0]);
        let native = m.transform(array![1.0, 2.0, 0.5].view(), array![0.0, 1.0, -1.0].view());
        assert_eq!(
            native,
            NativeParams::Supported {
                shape: None,
                loc: array![1.0, 3.0, -1.0],
                scale: array![0.5]
            }
        );
        assert_eq!(m.transform(array![1.0, 2.0].view(), array![0.0].view()), NativeParams::Unsupported);
    }

    #[test]
    fn initial_guess_uses_mean_and_population_std() {
        let m = model(array![1.0, 3.0], array![0.0, 1.0]);
        assert_eq!(m.initial_guess(), array![2.0, 0.0, 1.0]);
    }

    #[test]
    fn non_positive_scale_has_no_likelihood() {
        let m = model(array![1.0, 3.0], array![0.0, 1.0]);
        assert_eq!(m.loglike(array![2.0, 0.0, 0.0].view()), f64::NEG_INFINITY);
        assert_eq!(m.loglike(array![2.0, 0.0, -1.0].view()), f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Fit recovers the trend of synthetic data.
    //
    // Given
    // -----
    // - N = 500, cov uniform on [0, 1], x = 1 + 2·cov + N(0, 0.5²), fixed seed.
    //
    // Expect
    // ------
    // - b1 within 0.3 of 2 and scale within 0.1 of 0.5.
    fn fit_recovers_synthetic_trend() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Normal::new(0.0, 0.5).expect("valid normal");
        let n = 500;
        let cov = Array1::from_shape_fn(n, |i| i as f64 / (n - 1) as f64);
        let values = cov.mapv(|c| 1.0 + 2.0 * c + noise.sample(&mut rng));
        let theta_hat = model(values, cov).fit().expect("fit converges");
        assert!((theta_hat[1] - 2.0).abs() < 0.3, "b1 = {}", theta_hat[1]);
        assert_relative_eq!(theta_hat[2], 0.5, epsilon = 0.1);
    }

    #[test]
    fn with_prior_checks_index() {
        let data = CovariateData::new(array![1.0, 2.0], array![0.0, 1.0]).expect("data");
        let prior = Prior::gaussian(3, 0.0, 1.0).expect("prior");
        assert_eq!(
            NormCov::with_prior(data, prior),
            Err(ModelError::InvalidPriorIndex { index: 3, n_params: 3 })
        );
    }
}
