//! Monte Carlo pricing engine.
//!
//! This module provides the orchestration layer for Monte Carlo pricing.
//!
//! # Overview
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Random number generation (one [`PricerRng`] stream per block of paths)
//! 2. Exact GBM stepping (via [`GbmStepper`])
//! 3. Path reduction into a [`PathObserver`]
//! 4. Payoff evaluation, discounting and aggregation
//!
//! # Parallelism
//!
//! Paths are split into blocks of [`BLOCK_SIZE`]. Blocks run on the rayon
//! pool and each owns the generator seeded from `(base seed, block index)`,
//! so a seeded run gives the same estimate whatever the thread count.

use pricer_core::types::{MarketParameters, OptionType, PriceEstimate, PricingError};
use rayon::prelude::*;
use tracing::debug;

use super::config::MonteCarloConfig;
use super::error::ConfigError;
use super::lsm::longstaff_schwartz;
use super::paths::{GbmParams, GbmStepper};
use crate::path_dependent::{PathDependentPayoff, PathObserver, PathPayoff};
use crate::rng::{fresh_seed, PricerRng};

/// Number of paths simulated from one generator stream.
pub const BLOCK_SIZE: usize = 4096;

/// Largest number of stored prices for Longstaff-Schwartz
/// (`n_paths * (n_steps + 1)`).
pub const MAX_STORED_PRICES: usize = 25_000_000;

/// Monte Carlo pricer for European, path-dependent and American options.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketParameters, OptionType};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .n_steps(1)
///     .seed(42)
///     .build()
///     .unwrap();
/// let pricer = MonteCarloPricer::new(config).unwrap();
///
/// let market = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2);
/// let estimate = pricer.price_european(&market, OptionType::Call).unwrap();
/// assert!((estimate.price - 9.925).abs() < 4.0 * estimate.std_error);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
}

impl MonteCarloPricer {
    /// Creates a pricer after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the path or step count is out of range.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Configured seed, or a fresh one drawn for this run.
    fn base_seed(&self) -> u64 {
        match self.config.seed() {
            Some(seed) => seed,
            None => {
                let seed = fresh_seed();
                debug!(seed, "drew unseeded base seed");
                seed
            }
        }
    }

    /// Runs the simulation core with an arbitrary path reduction.
    ///
    /// Each path is streamed into a [`PathObserver`] and `payoff_fn` maps
    /// the observer to an undiscounted payoff. The result is the discounted
    /// sample mean and its standard error.
    pub fn simulate<F>(&self, gbm: GbmParams, payoff_fn: F) -> PriceEstimate
    where
        F: Fn(&PathObserver<f64>) -> f64 + Sync,
    {
        let n_paths = self.config.n_paths();
        let n_steps = self.config.n_steps();
        let stepper = GbmStepper::new(gbm, n_steps);
        let seed = self.base_seed();

        debug!(n_paths, n_steps, seed, "monte carlo simulation");

        let mut payoffs = vec![0.0; n_paths];
        payoffs
            .par_chunks_mut(BLOCK_SIZE)
            .enumerate()
            .for_each(|(block, out)| {
                let mut rng = PricerRng::for_stream(seed, block as u64);
                let mut observer = PathObserver::new();
                for value in out.iter_mut() {
                    let mut s = stepper.spot();
                    observer.start(s);
                    for _ in 0..n_steps {
                        s = stepper.step(s, rng.gen_normal());
                        observer.observe(s);
                    }
                    *value = payoff_fn(&observer);
                }
            });

        let raw = PriceEstimate::from_samples(&payoffs);
        let df = gbm.discount_factor();
        PriceEstimate::new(raw.price * df, raw.std_error * df)
    }

    /// Simulates and stores all paths, row-major with `n_steps + 1` prices
    /// per path.
    ///
    /// Uses the same block streams as [`simulate`](Self::simulate).
    pub fn simulate_paths(&self, gbm: GbmParams) -> Result<Vec<f64>, PricingError> {
        let n_paths = self.config.n_paths();
        let n_steps = self.config.n_steps();
        let row = n_steps + 1;
        if n_paths.saturating_mul(row) > MAX_STORED_PRICES {
            return Err(PricingError::invalid(
                "n_paths",
                format!(
                    "n_paths * (n_steps + 1) must not exceed {} for stored paths",
                    MAX_STORED_PRICES
                ),
            ));
        }

        let stepper = GbmStepper::new(gbm, n_steps);
        let seed = self.base_seed();
        debug!(n_paths, n_steps, seed, "storing simulated paths");

        let mut paths = vec![0.0; n_paths * row];
        paths
            .par_chunks_mut(BLOCK_SIZE * row)
            .enumerate()
            .for_each(|(block, out)| {
                let mut rng = PricerRng::for_stream(seed, block as u64);
                let mut normals = vec![0.0; n_steps];
                for path in out.chunks_exact_mut(row) {
                    stepper.fill_path(&mut rng, &mut normals, path);
                }
            });
        Ok(paths)
    }

    /// Prices a European call or put.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for invalid market data
    /// - `UnsupportedPayoff` when a dividend schedule is present
    pub fn price_european(
        &self,
        market: &MarketParameters,
        option_type: OptionType,
    ) -> Result<PriceEstimate, PricingError> {
        check_market(market)?;
        let strike = market.strike;
        Ok(self.simulate(GbmParams::from_market(market), |obs| {
            option_type.intrinsic(obs.terminal(), strike)
        }))
    }

    /// Prices a barrier, lookback or Asian payoff.
    ///
    /// The payoff is bound to the simulation grid first so that continuity
    /// corrected monitoring uses `σ√dt` of this configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for invalid market data or payoff terms
    /// - `UnsupportedPayoff` when a dividend schedule is present
    pub fn price_path_dependent(
        &self,
        market: &MarketParameters,
        payoff: PathPayoff<f64>,
    ) -> Result<PriceEstimate, PricingError> {
        check_market(market)?;
        payoff.validate()?;

        let gbm = GbmParams::from_market(market);
        let dt = gbm.maturity / self.config.n_steps() as f64;
        let bound = payoff.on_grid(gbm.volatility * dt.sqrt());
        debug!(payoff = %bound.describe(), "path-dependent payoff");

        Ok(self.simulate(gbm, |obs| bound.payoff(obs)))
    }

    /// Prices an American call or put by Longstaff-Schwartz regression.
    ///
    /// Exercise is allowed at every simulation date `t_1..t_N` and at
    /// `t = 0`; the configured step count is the number of exercise dates.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for invalid market data or too many stored prices
    /// - `UnsupportedPayoff` when a dividend schedule is present
    pub fn price_american(
        &self,
        market: &MarketParameters,
        option_type: OptionType,
    ) -> Result<PriceEstimate, PricingError> {
        check_market(market)?;
        let gbm = GbmParams::from_market(market);
        let paths = self.simulate_paths(gbm)?;
        let dt = gbm.maturity / self.config.n_steps() as f64;
        let step_discount = (-gbm.rate * dt).exp();

        Ok(longstaff_schwartz(
            &paths,
            self.config.n_steps(),
            market.strike,
            option_type,
            step_discount,
        ))
    }
}

/// Validates market data and rejects dividend schedules.
fn check_market(market: &MarketParameters) -> Result<(), PricingError> {
    market.validate()?;
    if !market.dividends.is_empty() {
        return Err(PricingError::unsupported(
            "discrete dividends are not simulated; use the binomial lattice",
        ));
    }
    Ok(())
}
