//! The covariate-model contract and the likelihood engine built on it.
//!
//! Purpose
//! -------
//! Define [`CovariateModel`], the single interface behind which the concrete
//! reparameterizations (`NormCov`, `NormCovScale`, `GevCov`) live, and
//! provide the shared machinery every model gets for free: a NaN-safe
//! log-likelihood with an optional prior, a Nelder–Mead maximum-likelihood
//! fit, and a prediction/query surface.
//!
//! Key behaviors
//! -------------
//! - Implementors supply only the data accessor, base family, parameter
//!   names, initial guess, prior and the `transform` from `(θ, cov)` to
//!   native parameters.
//! - [`CovariateModel::loglike`] never returns `NaN`: unsupported
//!   parameters, invalid native values and missing coordinates all collapse
//!   to `-∞`.
//! - [`CovariateModel::fit`] seeds the optimizer at
//!   [`CovariateModel::initial_guess`] and fails with
//!   [`OptError::FitNotConverged`] when the tolerance is not met.
//!
//! Invariants & assumptions
//! ------------------------
//! - Models own immutable [`CovariateData`]; every method takes `&self`, so
//!   concurrent likelihood evaluation (e.g. by ensemble walkers) is safe.
//! - `transform` is pure and total: wrong arity or out-of-support values
//!   give [`NativeParams::Unsupported`], never a panic.
//! - Fit results are returned, not cached on the model.
//!
//! Conventions
//! -----------
//! - Parameter vectors are passed as `ArrayView1<f64>` in the model's own
//!   natural coordinates, laid out as [`CovariateModel::param_names`].
//! - Scalar covariates on the query surface are `f64`; the model expands
//!   them to a length-1 series.
//!
//! Downstream usage
//! ----------------
//! - The MCMC driver evaluates [`CovariateModel::loglike`] as the walkers'
//!   log-probability and seeds the ensemble at [`CovariateModel::fit`].
//! - Python bindings forward to the provided methods unchanged.
//!
//! Testing notes
//! -------------
//! - Each variant module tests its transform and initial guess; the engine
//!   itself (sum + prior, sentinel handling, fit failure) is tested here on
//!   a minimal model.
use crate::{
    covariate::{
        core::{CovariateData, Family, NativeParams, Prior},
        models::model_internals::{ModelLikelihood, query_native},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{MLEOptions, OptimOutcome, Theta, maximize},
    },
};
use ndarray::{Array1, ArrayView1, aview1};

pub trait CovariateModel: Send + Sync {
    /// Observations and covariate the model is bound to.
    fn data(&self) -> &CovariateData;

    /// Base distribution family of the native parameters.
    fn family(&self) -> Family;

    /// Names of the raw parameters, in `θ` order.
    fn param_names(&self) -> &'static [&'static str];

    /// Heuristic starting point derived from the data's mean and population
    /// standard deviation.
    fn initial_guess(&self) -> Theta;

    /// Map `θ` and a covariate series to native parameters.
    fn transform(&self, theta: ArrayView1<f64>, cov: ArrayView1<f64>) -> NativeParams;

    /// Prior installed at construction time.
    fn prior(&self) -> &Prior;

    /// Model arity.
    fn n_params(&self) -> usize {
        self.param_names().len()
    }

    /// Log-prior at `θ` (0 for a flat prior).
    fn log_prior(&self, theta: ArrayView1<f64>) -> f64 {
        self.prior().log_density(theta)
    }

    /// Log-likelihood plus log-prior over the bound data.
    ///
    /// Sums per-observation log-densities of the native parameters implied
    /// by the full covariate series, adds [`CovariateModel::log_prior`] and
    /// maps any `NaN` to `-∞`.
    fn loglike(&self, theta: ArrayView1<f64>) -> f64 {
        let data = self.data();
        let native = self.transform(theta, data.cov.view());
        let value = native.log_density_sum(self.family(), data.values.view()) + self.log_prior(theta);
        if value.is_nan() { f64::NEG_INFINITY } else { value }
    }

    /// Negated [`CovariateModel::loglike`], the quantity being minimized.
    fn neg_loglike(&self, theta: ArrayView1<f64>) -> f64 {
        -self.loglike(theta)
    }

    /// Maximum-likelihood estimate with default options.
    ///
    /// # Errors
    /// - `OptError::FitNotConverged` if the simplex does not meet its
    ///   tolerance within the iteration budget.
    /// - `OptError::InfeasibleStart` if the initial guess has `-∞`
    ///   log-likelihood (e.g. constant data, so a zero scale guess).
    fn fit(&self) -> OptResult<Theta> {
        self.fit_with(&MLEOptions::default())
    }

    /// Maximum-likelihood estimate with explicit optimizer options.
    fn fit_with(&self, opts: &MLEOptions) -> OptResult<Theta> {
        Ok(self.fit_outcome(opts)?.into_converged()?.theta_hat)
    }

    /// Full optimizer outcome, returned whether or not it converged.
    fn fit_outcome(&self, opts: &MLEOptions) -> OptResult<OptimOutcome> {
        let outcome = maximize(&ModelLikelihood::new(self), &self.initial_guess(), opts)?;
        log::debug!(
            "fit finished: status {}, {} iterations, loglike {:.6}",
            outcome.status,
            outcome.iterations,
            outcome.value
        );
        Ok(outcome)
    }

    /// Location of the native distribution at covariate value `cov`
    /// (`NaN` when `θ` is unsupported).
    fn predict(&self, theta: ArrayView1<f64>, cov: f64) -> f64 {
        self.transform(theta, aview1(&[cov])).point(0).map_or(f64::NAN, |p| p.loc)
    }

    /// CDF at each of `x` for covariate value `cov`.
    fn cdf(&self, x: ArrayView1<f64>, theta: ArrayView1<f64>, cov: f64) -> Array1<f64> {
        query_native(self, x, theta, cov, Family::cdf)
    }

    /// Survival function at each of `x` for covariate value `cov`.
    fn sf(&self, x: ArrayView1<f64>, theta: ArrayView1<f64>, cov: f64) -> Array1<f64> {
        query_native(self, x, theta, cov, Family::sf)
    }

    /// Quantiles at probabilities `q` for covariate value `cov`.
    fn ppf(&self, q: ArrayView1<f64>, theta: ArrayView1<f64>, cov: f64) -> Array1<f64> {
        query_native(self, q, theta, cov, Family::ppf)
    }

    /// Inverse survival function at probabilities `q` for covariate value `cov`.
    fn isf(&self, q: ArrayView1<f64>, theta: ArrayView1<f64>, cov: f64) -> Array1<f64> {
        query_native(self, q, theta, cov, Family::isf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        covariate::{core::NativePoint, models::model_internals::unpack},
        optimization::{
            errors::OptError,
            loglik_optimizer::{SimplexSteps, Tolerances},
        },
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    // Normal(mu, 1) ignoring the covariate; `mu > 10` is declared unsupported.
    struct Toy {
        data: CovariateData,
        prior: Prior,
    }

    impl CovariateModel for Toy {
        fn data(&self) -> &CovariateData {
            &self.data
        }
        fn family(&self) -> Family {
            Family::Normal
        }
        fn param_names(&self) -> &'static [&'static str] {
            &["mu"]
        }
        fn initial_guess(&self) -> Theta {
            array![self.data.mean()]
        }
        fn transform(&self, theta: ArrayView1<f64>, _cov: ArrayView1<f64>) -> NativeParams {
            match unpack::<1>(theta) {
                Some([mu]) if mu <= 10.0 => {
                    NativeParams::Supported { shape: None, loc: array![mu], scale: array![1.0] }
                }
                _ => NativeParams::Unsupported,
            }
        }
        fn prior(&self) -> &Prior {
            &self.prior
        }
    }

    fn toy(prior: Prior) -> Toy {
        let data = CovariateData::new(array![0.5, 1.5, 1.0], array![0.0, 0.0, 0.0]).expect("data");
        Toy { data, prior }
    }

    #[test]
    // Purpose
    // -------
    // A finite log-likelihood equals the independent sum of log-densities
    // plus the log-prior.
    fn loglike_is_sum_of_logpdf_plus_prior() {
        let prior = Prior::gaussian(0, 0.0, 2.0).expect("prior");
        let model = toy(prior);
        let theta = array![0.8];
        let point = NativePoint { shape: None, loc: 0.8, scale: 1.0 };
        let expected: f64 = [0.5, 1.5, 1.0]
            .iter()
            .map(|&x| Family::Normal.logpdf(x, point))
            .sum::<f64>()
            + prior.log_density(theta.view());
        assert_relative_eq!(model.loglike(theta.view()), expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Unsupported parameters and wrong arity give `-∞`, never `NaN`, and
    // `neg_loglike` mirrors the sign including infinities.
    fn sentinel_and_arity_mismatch_collapse_to_neg_infinity() {
        let model = toy(Prior::Flat);
        assert_eq!(model.loglike(array![11.0].view()), f64::NEG_INFINITY);
        assert_eq!(model.loglike(array![1.0, 2.0].view()), f64::NEG_INFINITY);
        assert_eq!(model.neg_loglike(array![11.0].view()), f64::INFINITY);
        let theta = array![1.0];
        assert_eq!(model.neg_loglike(theta.view()), -model.loglike(theta.view()));
    }

    #[test]
    fn fit_recovers_sample_mean() {
        let model = toy(Prior::Flat);
        let theta_hat = model.fit().expect("fit converges");
        assert_relative_eq!(theta_hat[0], 1.0, epsilon = 1e-2);
    }

    #[test]
    // Purpose
    // -------
    // An iteration-capped run surfaces as `FitNotConverged` from `fit_with`
    // while `fit_outcome` still reports the partial result.
    fn fit_with_iteration_cap_fails() {
        let model = Toy {
            data: CovariateData::new(array![5.0, 7.0], array![0.0, 0.0]).expect("data"),
            prior: Prior::Flat,
        };
        let opts = MLEOptions::new(
            Tolerances::new(Some(1e-14), Some(1)).expect("tols"),
            SimplexSteps::new(0.5, 0.5).expect("steps"),
            false,
        );
        assert!(matches!(model.fit_with(&opts), Err(OptError::FitNotConverged { .. })));
        let outcome = model.fit_outcome(&opts).expect("outcome");
        assert!(!outcome.converged);
    }

    #[test]
    fn query_surface_uses_native_point_at_covariate() {
        let model = toy(Prior::Flat);
        let theta = array![2.0];
        assert_eq!(model.predict(theta.view(), 123.0), 2.0);
        let cdf = model.cdf(array![2.0].view(), theta.view(), 0.0);
        assert_relative_eq!(cdf[0], 0.5, epsilon = 1e-12);
        let q = model.ppf(array![0.5, 2.0].view(), theta.view(), 0.0);
        assert_relative_eq!(q[0], 2.0, epsilon = 1e-8);
        assert!(q[1].is_nan());
        assert!(model.predict(array![20.0].view(), 0.0).is_nan());
        assert!(model.sf(array![0.0, 1.0].view(), array![20.0].view(), 0.0).iter().all(|v| v.is_nan()));
    }
}
