//! Optional prior term added to a model's log-likelihood.
//!
//! Purpose
//! -------
//! Represent the log-prior a model carries as a plain field chosen at
//! construction time, instead of a separate model subtype.
//!
//! Key behaviors
//! -------------
//! - [`Prior::Flat`] contributes 0.
//! - [`Prior::Gaussian`] contributes the Normal log-density of one
//!   parameter coordinate, `ln N(θ[index]; mean, sd)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Gaussian priors have a finite `mean` and a finite, strictly positive
//!   `sd`; [`Prior::gaussian`] enforces both.
//! - `index` is checked against the model arity by
//!   [`Prior::validate_for`] when the prior is installed on a model.
use crate::covariate::errors::{ModelError, ModelResult};
use ndarray::ArrayView1;
use statrs::distribution::{Continuous, Normal};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Prior {
    #[default]
    Flat,
    Gaussian { index: usize, mean: f64, sd: f64 },
}

impl Prior {
    /// Validated Gaussian prior on coordinate `index`.
    ///
    /// # Errors
    /// `ModelError::InvalidPriorScale` if `sd` is not finite and > 0, or if
    /// `mean` is not finite (reported with the offending value).
    pub fn gaussian(index: usize, mean: f64, sd: f64) -> ModelResult<Self> {
        if !sd.is_finite() || sd <= 0.0 {
            return Err(ModelError::InvalidPriorScale { value: sd });
        }
        if !mean.is_finite() {
            return Err(ModelError::InvalidPriorScale { value: mean });
        }
        Ok(Prior::Gaussian { index, mean, sd })
    }

    /// Check that the prior refers to a coordinate of an `n_params` vector.
    pub fn validate_for(&self, n_params: usize) -> ModelResult<()> {
        match *self {
            Prior::Gaussian { index, .. } if index >= n_params => {
                Err(ModelError::InvalidPriorIndex { index, n_params })
            }
            _ => Ok(()),
        }
    }

    /// Log-prior density at `theta`; `NaN` when the coordinate is missing.
    pub fn log_density(&self, theta: ArrayView1<f64>) -> f64 {
        match *self {
            Prior::Flat => 0.0,
            Prior::Gaussian { index, mean, sd } => match (theta.get(index), Normal::new(mean, sd)) {
                (Some(&x), Ok(normal)) => normal.ln_pdf(x),
                _ => f64::NAN,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn flat_prior_contributes_zero() {
        assert_eq!(Prior::Flat.log_density(array![1.0, 2.0].view()), 0.0);
        assert_eq!(Prior::default(), Prior::Flat);
    }

    #[test]
    fn gaussian_prior_scores_one_coordinate() {
        let prior = Prior::gaussian(1, 0.0, 0.5).expect("valid prior");
        let expected = -0.5 * (2.0 * std::f64::consts::PI).ln() - 0.5_f64.ln() - 0.5 * 4.0;
        assert_relative_eq!(prior.log_density(array![9.0, 1.0].view()), expected, epsilon = 1e-12);
        assert!(prior.log_density(array![9.0].view()).is_nan());
    }

    #[test]
    fn gaussian_prior_validation() {
        assert!(matches!(Prior::gaussian(0, 0.0, 0.0), Err(ModelError::InvalidPriorScale { .. })));
        assert!(matches!(
            Prior::gaussian(0, 0.0, f64::INFINITY),
            Err(ModelError::InvalidPriorScale { .. })
        ));
        let prior = Prior::gaussian(4, 0.0, 1.0).expect("valid prior");
        assert_eq!(prior.validate_for(4), Err(ModelError::InvalidPriorIndex { index: 4, n_params: 4 }));
        assert!(prior.validate_for(5).is_ok());
    }
}
