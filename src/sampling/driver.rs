//! Fit-then-sample posterior driver.
//!
//! Purpose
//! -------
//! Turn a bound [`CovariateModel`] into a posterior ensemble. The driver
//! maximizes the likelihood, scatters the walkers in a tight ball around the
//! estimate, discards a burn-in phase and keeps a production run.
//!
//! Key behaviors
//! -------------
//! - [`run_mcmc`] validates [`McmcOptions`] against the model arity before
//!   any work is done.
//! - A failed seeding fit surfaces as [`SamplingError::Fit`].
//! - The walkers' log-probability is [`CovariateModel::loglike`], prior
//!   included.
//! - One seed drives both the ball and the sampler, so a seeded run is
//!   reproducible end to end.
//!
//! Downstream usage
//! ----------------
//! - [`PosteriorEnsemble::param_samples`] feeds
//!   [`param_range`](crate::sampling::summary::param_range) directly.
use crate::{
    covariate::models::CovariateModel,
    optimization::loglik_optimizer::Theta,
    sampling::{
        ensemble::{EnsembleSampler, StretchMove},
        errors::SamplingResult,
        init::sample_ball,
        options::McmcOptions,
    },
};
use ndarray::{Array1, Array2, Array3, ArrayView1};
use rand::{SeedableRng, rngs::StdRng};

/// Production-phase output of [`run_mcmc`].
///
/// - `chain`: `(production, n_walkers, n_params)`.
/// - `log_prob`: `(production, n_walkers)`.
/// - `acceptance_fraction`: per walker, over production only.
/// - `theta_mle`: the estimate the walkers were seeded around.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorEnsemble {
    pub chain: Array3<f64>,
    pub log_prob: Array2<f64>,
    pub acceptance_fraction: Array1<f64>,
    pub theta_mle: Theta,
    pub param_names: Vec<String>,
}

impl PosteriorEnsemble {
    pub fn n_steps(&self) -> usize {
        self.chain.dim().0
    }

    pub fn n_walkers(&self) -> usize {
        self.chain.dim().1
    }

    /// Samples flattened step-major to `(production · n_walkers, n_params)`.
    pub fn flat_chain(&self) -> Array2<f64> {
        let (steps, walkers, dim) = self.chain.dim();
        Array2::from_shape_fn((steps * walkers, dim), |(r, j)| {
            self.chain[[r / walkers, r % walkers, j]]
        })
    }

    /// All samples of parameter `j`, or `None` if `j` is out of range.
    pub fn param_samples(&self, j: usize) -> Option<Array1<f64>> {
        (j < self.chain.dim().2).then(|| self.flat_chain().column(j).to_owned())
    }

    /// All samples of the parameter called `name`.
    pub fn param_samples_by_name(&self, name: &str) -> Option<Array1<f64>> {
        let j = self.param_names.iter().position(|n| n == name)?;
        self.param_samples(j)
    }
}

/// Fit `model`, then sample its posterior with an affine-invariant ensemble.
///
/// # Errors
/// - Any [`McmcOptions::validate`] error.
/// - `SamplingError::Fit` if the maximum-likelihood fit fails or does not
///   converge.
pub fn run_mcmc<M: CovariateModel + ?Sized>(
    model: &M, opts: &McmcOptions,
) -> SamplingResult<PosteriorEnsemble> {
    let n_params = model.n_params();
    opts.validate(n_params)?;

    let theta_mle = model.fit_with(&opts.mle_opts)?;
    if opts.verbose {
        log::info!("MLE: {theta_mle}");
    }

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let std = Array1::from_elem(n_params, opts.ball_scale);
    let p0 = sample_ball(theta_mle.view(), std.view(), opts.n_walkers, &mut rng)?;

    let stretch = StretchMove::new(opts.stretch_scale)?;
    let sampler_seed = opts.seed.map(|s| s.wrapping_add(1));
    let mut sampler = EnsembleSampler::new(
        opts.n_walkers,
        n_params,
        |theta: ArrayView1<f64>| model.loglike(theta),
        stretch,
        sampler_seed,
    )?;

    if opts.verbose {
        log::info!("Running burn-in...");
    }
    let p = sampler.run_mcmc(p0.view(), opts.burn_in)?;
    sampler.reset();

    if opts.verbose {
        log::info!("Running production...");
    }
    sampler.run_mcmc(p.view(), opts.production)?;

    let acceptance_fraction = sampler.acceptance_fraction();
    if opts.verbose {
        log::info!(
            "Done: mean acceptance fraction {:.3}",
            acceptance_fraction.mean().unwrap_or(f64::NAN)
        );
    }

    Ok(PosteriorEnsemble {
        chain: sampler.chain(),
        log_prob: sampler.log_prob(),
        acceptance_fraction,
        theta_mle,
        param_names: model.param_names().iter().map(|n| n.to_string()).collect(),
    })
}

/// Older entry point that hands the model back alongside the ensemble.
#[deprecated(note = "use `run_mcmc`; the model is no longer consumed")]
pub fn glm_mcmc<M: CovariateModel>(
    model: M, opts: &McmcOptions,
) -> SamplingResult<(M, PosteriorEnsemble)> {
    log::warn!("glm_mcmc is deprecated; call run_mcmc instead");
    let ensemble = run_mcmc(&model, opts)?;
    Ok((model, ensemble))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        covariate::{CovariateData, NormCov},
        optimization::errors::OptError,
        sampling::errors::SamplingError,
    };
    use ndarray::{Axis, array};
    use rand_distr::{Distribution, Normal};

    fn trend_model(n: usize, seed: u64) -> NormCov {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, 0.5).expect("valid normal");
        let cov = Array1::from_shape_fn(n, |i| i as f64 / (n - 1) as f64);
        let values = cov.mapv(|c| 1.0 + 2.0 * c + noise.sample(&mut rng));
        NormCov::new(CovariateData::new(values, cov).expect("data"))
    }

    fn quick_opts(seed: u64) -> McmcOptions {
        McmcOptions {
            n_walkers: 10,
            burn_in: 200,
            production: 300,
            verbose: false,
            seed: Some(seed),
            ..McmcOptions::default()
        }
    }

    #[test]
    // Purpose
    // -------
    // The production chain has the documented shape and its mean sits
    // near the maximum-likelihood estimate.
    //
    // Given
    // -----
    // - NormCov on N = 200 synthetic points, 10 walkers, 200 + 300 steps.
    //
    // Expect
    // ------
    // - chain (300, 10, 3), log_prob (300, 10), acceptance (10).
    // - Posterior means within 0.5 of θ̂ for every coordinate.
    // - Every stored log-probability is finite.
    fn ensemble_shape_and_posterior_mean() {
        let model = trend_model(200, 17);
        let ens = run_mcmc(&model, &quick_opts(99)).expect("sampling succeeds");

        assert_eq!(ens.chain.dim(), (300, 10, 3));
        assert_eq!(ens.log_prob.dim(), (300, 10));
        assert_eq!(ens.acceptance_fraction.len(), 10);
        assert_eq!(ens.param_names, vec!["b0", "b1", "scale"]);
        assert_eq!(ens.flat_chain().dim(), (3000, 3));

        let mean = ens.flat_chain().mean_axis(Axis(0)).expect("non-empty");
        for j in 0..3 {
            assert!(
                (mean[j] - ens.theta_mle[j]).abs() < 0.5,
                "coordinate {j}: mean {} vs mle {}",
                mean[j],
                ens.theta_mle[j]
            );
        }
        assert!(ens.log_prob.iter().all(|lp| lp.is_finite()));
        assert!(ens.acceptance_fraction.iter().any(|&a| a > 0.0));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let model = trend_model(50, 1);
        let opts = McmcOptions { burn_in: 20, production: 30, ..quick_opts(5) };
        let a = run_mcmc(&model, &opts).expect("a");
        let b = run_mcmc(&model, &opts).expect("b");
        assert_eq!(a.chain, b.chain);
    }

    #[test]
    fn param_samples_lookup() {
        let model = trend_model(50, 2);
        let opts = McmcOptions { burn_in: 10, production: 5, ..quick_opts(3) };
        let ens = run_mcmc(&model, &opts).expect("sampling");
        assert_eq!(ens.param_samples(1).map(|s| s.len()), Some(50));
        assert_eq!(ens.param_samples_by_name("b1"), ens.param_samples(1));
        assert_eq!(ens.param_samples(3), None);
        assert_eq!(ens.param_samples_by_name("shape"), None);
    }

    #[test]
    fn invalid_options_fail_before_fitting() {
        let model = trend_model(50, 3);
        let opts = McmcOptions { n_walkers: 4, ..quick_opts(0) };
        assert_eq!(
            run_mcmc(&model, &opts).err(),
            Some(SamplingError::InvalidWalkerCount { n_walkers: 4, n_dim: 3 })
        );
    }

    #[test]
    fn degenerate_data_surfaces_as_fit_error() {
        let data = CovariateData::new(array![2.0, 2.0, 2.0, 2.0], array![0.0, 1.0, 2.0, 3.0]).expect("data");
        let err = run_mcmc(&NormCov::new(data), &quick_opts(0)).expect_err("constant data");
        assert!(matches!(err, SamplingError::Fit(OptError::InfeasibleStart { .. })));
    }

    #[test]
    #[allow(deprecated)]
    fn glm_mcmc_returns_the_model() {
        let model = trend_model(40, 4);
        let opts = McmcOptions { burn_in: 5, production: 5, ..quick_opts(1) };
        let (back, ens) = glm_mcmc(model.clone(), &opts).expect("sampling");
        assert_eq!(back, model);
        assert_eq!(ens.n_steps(), 5);
        assert_eq!(ens.n_walkers(), 10);
    }
}
