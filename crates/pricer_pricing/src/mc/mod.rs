//! Monte Carlo pricing under geometric Brownian motion.
//!
//! # Architecture
//!
//! ```text
//! price_monte_carlo (facade)
//! └── MonteCarloPricer
//!     ├── MonteCarloConfig  (paths, steps, seed)
//!     ├── GbmStepper        (exact lognormal step)
//!     ├── PricerRng         (one stream per block of paths)
//!     └── simulate(payoff_fn)
//!         ├── European        terminal payoff
//!         ├── PathPayoff      barrier / lookback / Asian
//!         └── Longstaff-Schwartz on stored paths (American)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::{MarketParameters, OptionType};
//! use pricer_pricing::mc::{price_monte_carlo, McPayoff, MonteCarloConfig};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(50)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let market = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2);
//!
//! let estimate = price_monte_carlo(&market, &config, McPayoff::European(OptionType::Put)).unwrap();
//! assert!(estimate.std_error > 0.0);
//! println!("put = {:.4} ± {:.4}", estimate.price, estimate.confidence_95());
//! ```

mod config;
mod error;
mod lsm;
mod paths;
mod pricer;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, MAX_PATHS, MAX_STEPS, MIN_PATHS};
pub use error::ConfigError;
pub use paths::{generate_gbm_paths, GbmParams, GbmStepper};
pub use pricer::{MonteCarloPricer, BLOCK_SIZE, MAX_STORED_PRICES};

use pricer_core::types::{MarketParameters, OptionType, PriceEstimate, PricingError};
use pricer_models::analytical::BarrierType;
use tracing::warn;

use crate::path_dependent::{
    AsianPayoff, Averaging, BarrierPayoff, LookbackPayoff, Monitoring, PathPayoff,
};

/// Payoff selection for [`price_monte_carlo`].
///
/// Strikes and barrier levels come from the [`MarketParameters`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum McPayoff {
    /// European call or put.
    European(OptionType),
    /// American call or put (Longstaff-Schwartz).
    American(OptionType),
    /// Single-barrier option on `params.barrier`.
    Barrier {
        /// Direction, knock type and option type.
        barrier_type: BarrierType,
        /// Barrier monitoring mode.
        monitoring: Monitoring,
    },
    /// Floating-strike lookback.
    Lookback {
        /// Call or put.
        option_type: OptionType,
        /// Extreme monitoring mode.
        monitoring: Monitoring,
    },
    /// Fixed-strike average-price option.
    Asian {
        /// Call or put.
        option_type: OptionType,
        /// Arithmetic or geometric averaging.
        averaging: Averaging,
    },
}

impl McPayoff {
    /// Builds the path payoff of a path-dependent selection.
    fn path_payoff(self, params: &MarketParameters) -> Result<PathPayoff<f64>, PricingError> {
        match self {
            McPayoff::European(_) | McPayoff::American(_) => Err(PricingError::unsupported(
                format!("{:?} is not a path-dependent payoff", self),
            )),
            McPayoff::Barrier {
                barrier_type,
                monitoring,
            } => Ok(BarrierPayoff::new(
                params.strike,
                params.require_barrier()?,
                barrier_type,
                monitoring,
            )
            .into()),
            McPayoff::Lookback {
                option_type,
                monitoring,
            } => Ok(LookbackPayoff::new(option_type, monitoring).into()),
            McPayoff::Asian {
                option_type,
                averaging,
            } => Ok(AsianPayoff::new(params.strike, option_type, averaging).into()),
        }
    }
}

/// Prices `payoff` by Monte Carlo simulation.
///
/// # Errors
///
/// - `InvalidParameter` for invalid market data, configuration or payoff terms
/// - `UnsupportedPayoff` when a dividend schedule is present
pub fn price_monte_carlo(
    params: &MarketParameters,
    config: &MonteCarloConfig,
    payoff: McPayoff,
) -> Result<PriceEstimate, PricingError> {
    run(params, config, payoff).map_err(|err| {
        warn!(error = %err, ?payoff, "monte carlo pricing rejected");
        err
    })
}

fn run(
    params: &MarketParameters,
    config: &MonteCarloConfig,
    payoff: McPayoff,
) -> Result<PriceEstimate, PricingError> {
    params.validate()?;
    let pricer = MonteCarloPricer::new(config.clone())?;
    match payoff {
        McPayoff::European(option_type) => pricer.price_european(params, option_type),
        McPayoff::American(option_type) => pricer.price_american(params, option_type),
        McPayoff::Barrier { .. } | McPayoff::Lookback { .. } | McPayoff::Asian { .. } => {
            pricer.price_path_dependent(params, payoff.path_payoff(params)?)
        }
    }
}
