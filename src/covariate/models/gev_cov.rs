//! GevCov: generalized extreme value distribution with a covariate-driven location.
//!
//! Parameter layout `θ = (shape, b0, b1, scale)`:
//! - the base family uses `c = -shape` (`scipy.stats.genextreme` sign), so a
//!   positive `shape` here means a heavy upper tail;
//! - `loc(cov) = b0 + b1·cov`;
//! - `scale` is constant.
//!
//! An optional shape constraint installs a zero-mean Gaussian prior on
//! `shape` with standard deviation `constraint / 2`. A constraint of zero
//! (within `1e-8`) means "no prior" rather than a zero-width Gaussian.
use crate::{
    covariate::{
        core::{CovariateData, Family, NativeParams, Prior},
        errors::{ModelError, ModelResult},
        models::{covariate_model::CovariateModel, model_internals::unpack},
    },
    optimization::loglik_optimizer::Theta,
};
use ndarray::{ArrayView1, array};

/// Constraints this close to zero disable the prior.
pub const CONSTRAINT_ZERO_TOL: f64 = 1e-8;

/// Starting value of the shape parameter.
pub const SHAPE_GUESS: f64 = -0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct GevCov {
    data: CovariateData,
    prior: Prior,
}

impl GevCov {
    pub const PARAM_NAMES: [&'static str; 4] = ["shape", "b0", "b1", "scale"];

    /// Build the model, turning an optional shape constraint into a prior.
    ///
    /// - `None` or `Some(c)` with `|c| ≤ 1e-8` → flat prior (the latter is
    ///   logged at warn level).
    /// - `Some(c)` with `c > 0` → `Prior::Gaussian { index: 0, mean: 0, sd: c / 2 }`.
    ///
    /// # Errors
    /// `ModelError::InvalidShapeConstraint` for a negative or non-finite
    /// constraint.
    pub fn new(data: CovariateData, constraint: Option<f64>) -> ModelResult<Self> {
        let prior = match constraint {
            None => Prior::Flat,
            Some(c) if !c.is_finite() => {
                return Err(ModelError::InvalidShapeConstraint { value: c });
            }
            Some(c) if c.abs() <= CONSTRAINT_ZERO_TOL => {
                log::warn!("shape constraint {c} is zero; fitting without a shape prior");
                Prior::Flat
            }
            Some(c) if c < 0.0 => return Err(ModelError::InvalidShapeConstraint { value: c }),
            Some(c) => Prior::gaussian(0, 0.0, c / 2.0)?,
        };
        Ok(GevCov { data, prior })
    }

    /// Model with an arbitrary prior on any coordinate.
    pub fn with_prior(data: CovariateData, prior: Prior) -> ModelResult<Self> {
        prior.validate_for(Self::PARAM_NAMES.len())?;
        Ok(GevCov { data, prior })
    }
}

impl CovariateModel for GevCov {
    fn data(&self) -> &CovariateData {
        &self.data
    }

    fn family(&self) -> Family {
        Family::GenExtreme
    }

    fn param_names(&self) -> &'static [&'static str] {
        &Self::PARAM_NAMES
    }

    /// `[-0.15, mean, 0, std]`.
    fn initial_guess(&self) -> Theta {
        array![SHAPE_GUESS, self.data.mean(), 0.0, self.data.std()]
    }

    fn transform(&self, theta: ArrayView1<f64>, cov: ArrayView1<f64>) -> NativeParams {
        match unpack::<4>(theta) {
            Some([shape, b0, b1, scale]) => NativeParams::Supported {
                shape: Some(-shape),
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
    use crate::covariate::core::NativePoint;
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn data() -> CovariateData {
        CovariateData::new(array![1.0, 2.5, 0.7, 1.9], array![0.0, 0.3, 0.6, 0.9]).expect("data")
    }

    #[test]
    fn transform_negates_shape_for_the_base_family() {
        let m = GevCov::new(data(), None).expect("model");
        let native = m.transform(array![0.2, 1.0, 2.0, 0.5].view(), array![1.0].view());
        assert_eq!(native.point(0), Some(NativePoint { shape: Some(-0.2), loc: 3.0, scale: 0.5 }));
    }

    #[test]
    // Purpose
    // -------
    // A zero constraint disables the prior instead of building a degenerate
    // Gaussian; positive constraints become N(0, (c/2)²) on the shape.
    fn constraint_maps_to_prior() {
        assert_eq!(GevCov::new(data(), Some(0.0)).expect("model").prior(), &Prior::Flat);
        assert_eq!(GevCov::new(data(), Some(1e-9)).expect("model").prior(), &Prior::Flat);
        assert_eq!(
            GevCov::new(data(), Some(0.4)).expect("model").prior(),
            &Prior::Gaussian { index: 0, mean: 0.0, sd: 0.2 }
        );
        assert!(matches!(
            GevCov::new(data(), Some(-0.4)),
            Err(ModelError::InvalidShapeConstraint { .. })
        ));
        assert!(matches!(
            GevCov::new(data(), Some(f64::NAN)),
            Err(ModelError::InvalidShapeConstraint { .. })
        ));
    }

    #[test]
    fn prior_enters_loglike() {
        let flat = GevCov::new(data(), None).expect("model");
        let constrained = GevCov::new(data(), Some(0.4)).expect("model");
        let theta = array![0.1, 1.5, 0.0, 1.0];
        let diff = constrained.loglike(theta.view()) - flat.loglike(theta.view());
        assert_relative_eq!(diff, constrained.log_prior(theta.view()), epsilon = 1e-12);
        assert!(diff.is_finite());
    }

    #[test]
    fn initial_guess_layout() {
        let m = GevCov::new(data(), None).expect("model");
        let guess = m.initial_guess();
        assert_eq!(guess.len(), 4);
        assert_eq!(guess[0], SHAPE_GUESS);
        assert_relative_eq!(guess[1], m.data().mean());
        assert_eq!(guess[2], 0.0);
        assert_relative_eq!(guess[3], m.data().std());
    }

    #[test]
    // Purpose
    // -------
    // Observations beyond the support of the implied distribution give `-∞`.
    //
    // Given
    // -----
    // - shape = -0.5 (c = 0.5), b0 = 0, scale = 1 → upper endpoint at 2.
    //
    // Expect
    // ------
    // - The data point 2.5 lies outside the support, so loglike is `-∞`.
    fn out_of_support_observation_gives_neg_infinity() {
        let m = GevCov::new(data(), None).expect("model");
        assert_eq!(m.loglike(array![-0.5, 0.0, 0.0, 1.0].view()), f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Fit recovers the location trend of GEV data drawn by inversion.
    //
    // Given
    // -----
    // - shape = -0.1 (bounded upper tail), loc = 5 + 3·cov, scale = 1,
    //   N = 1500, fixed seed.
    //
    // Expect
    // ------
    // - b1 within 0.5 of 3 and scale within 0.15 of 1.
    fn fit_recovers_location_trend() {
        let mut rng = StdRng::seed_from_u64(3);
        let n = 1500;
        let cov = Array1::from_shape_fn(n, |i| i as f64 / (n - 1) as f64);
        let values = cov.mapv(|c| {
            let u: f64 = rng.gen_range(1e-12..1.0);
            let point = NativePoint { shape: Some(0.1), loc: 5.0 + 3.0 * c, scale: 1.0 };
            Family::GenExtreme.ppf(u, point)
        });
        let m = GevCov::new(CovariateData::new(values, cov).expect("data"), None).expect("model");
        let theta_hat = m.fit().expect("fit converges");
        assert!((theta_hat[2] - 3.0).abs() < 0.5, "b1 = {}", theta_hat[2]);
        assert!((theta_hat[3] - 1.0).abs() < 0.15, "scale = {}", theta_hat[3]);
    }
}
