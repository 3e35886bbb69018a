//! Configuration for the fit-then-sample posterior driver.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    sampling::errors::{SamplingError, SamplingResult},
};

/// Default number of walkers.
pub const DEFAULT_N_WALKERS: usize = 50;
/// Default burn-in length, discarded before production.
pub const DEFAULT_BURN_IN: usize = 500;
/// Default number of production steps kept in the posterior.
pub const DEFAULT_PRODUCTION: usize = 1000;
/// Default absolute standard deviation of the initial walker ball.
pub const DEFAULT_BALL_SCALE: f64 = 1e-4;

/// Options for [`run_mcmc`](crate::sampling::driver::run_mcmc).
///
/// - `n_walkers`: ensemble size; at least 2 and at least twice the model arity.
/// - `burn_in`: steps run and discarded before the sampler is reset (may be 0).
/// - `production`: steps kept in the returned ensemble (≥ 1).
/// - `verbose`: emit `log::info!` progress messages.
/// - `seed`: RNG seed; `None` seeds from entropy.
/// - `stretch_scale`: stretch-move parameter `a` (> 1).
/// - `ball_scale`: absolute standard deviation of the initial ball (> 0).
/// - `mle_opts`: options for the seeding maximum-likelihood fit.
#[derive(Debug, Clone, PartialEq)]
pub struct McmcOptions {
    pub n_walkers: usize,
    pub burn_in: usize,
    pub production: usize,
    pub verbose: bool,
    pub seed: Option<u64>,
    pub stretch_scale: f64,
    pub ball_scale: f64,
    pub mle_opts: MLEOptions,
}

impl Default for McmcOptions {
    fn default() -> Self {
        Self {
            n_walkers: DEFAULT_N_WALKERS,
            burn_in: DEFAULT_BURN_IN,
            production: DEFAULT_PRODUCTION,
            verbose: true,
            seed: None,
            stretch_scale: 2.0,
            ball_scale: DEFAULT_BALL_SCALE,
            mle_opts: MLEOptions::default(),
        }
    }
}

impl McmcOptions {
    /// Check the options against a model with `n_params` parameters.
    ///
    /// # Errors
    /// - `SamplingError::InvalidWalkerCount` if `n_walkers < 2` or
    ///   `n_walkers < 2·n_params`.
    /// - `SamplingError::InvalidSteps` if `production == 0`.
    /// - `SamplingError::InvalidStretchScale` unless `stretch_scale` is finite and > 1.
    /// - `SamplingError::InvalidBallScale` unless `ball_scale` is finite and > 0.
    pub fn validate(&self, n_params: usize) -> SamplingResult<()> {
        if self.n_walkers < 2 || self.n_walkers < 2 * n_params {
            return Err(SamplingError::InvalidWalkerCount {
                n_walkers: self.n_walkers,
                n_dim: n_params,
            });
        }
        if self.production == 0 {
            return Err(SamplingError::InvalidSteps {
                steps: 0,
                reason: "production needs at least one step",
            });
        }
        if !self.stretch_scale.is_finite() || self.stretch_scale <= 1.0 {
            return Err(SamplingError::InvalidStretchScale { value: self.stretch_scale });
        }
        if !self.ball_scale.is_finite() || self.ball_scale <= 0.0 {
            return Err(SamplingError::InvalidBallScale { value: self.ball_scale });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_for_small_models() {
        let opts = McmcOptions::default();
        assert_eq!(opts.n_walkers, 50);
        assert_eq!(opts.burn_in, 500);
        assert_eq!(opts.production, 1000);
        assert!(opts.verbose);
        assert_eq!(opts.seed, None);
        assert!(opts.validate(4).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Each invalid field is reported with its own variant.
    fn validate_reports_each_violation() {
        let walkers = McmcOptions { n_walkers: 7, ..McmcOptions::default() };
        assert_eq!(
            walkers.validate(4),
            Err(SamplingError::InvalidWalkerCount { n_walkers: 7, n_dim: 4 })
        );
        let one = McmcOptions { n_walkers: 1, ..McmcOptions::default() };
        assert!(one.validate(0).is_err());

        let production = McmcOptions { production: 0, ..McmcOptions::default() };
        assert!(matches!(production.validate(3), Err(SamplingError::InvalidSteps { .. })));

        let stretch = McmcOptions { stretch_scale: 1.0, ..McmcOptions::default() };
        assert_eq!(stretch.validate(3), Err(SamplingError::InvalidStretchScale { value: 1.0 }));

        let ball = McmcOptions { ball_scale: -1e-4, ..McmcOptions::default() };
        assert_eq!(ball.validate(3), Err(SamplingError::InvalidBallScale { value: -1e-4 }));

        let no_burn_in = McmcOptions { burn_in: 0, ..McmcOptions::default() };
        assert!(no_burn_in.validate(3).is_ok());
    }
}
