//! # Pricer Pricing (Layer 3: Numerical Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing holds the numerical option pricers of the workspace:
//! - [`mc`]: Monte Carlo under exact-step geometric Brownian motion, with a
//!   generic path-reduction core, path-dependent payoffs and
//!   Longstaff-Schwartz early exercise
//! - [`path_dependent`]: streaming path statistics and barrier, lookback and
//!   Asian payoffs
//! - [`rng`]: seeded generators with per-block streams
//! - [`lattice`]: Cox-Ross-Rubinstein binomial tree with proportional
//!   discrete dividends
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): market parameters, price estimates, errors
//! - Layer 2 (pricer_models): closed-form prices used as control values
//!   in the tests, barrier type definitions
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{ExerciseStyle, MarketParameters, OptionType};
//! use pricer_pricing::lattice::price_binomial;
//! use pricer_pricing::mc::{price_monte_carlo, McPayoff, MonteCarloConfig};
//!
//! let market = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2);
//!
//! let tree = price_binomial(&market, 500, OptionType::Put, ExerciseStyle::American).unwrap();
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(20_000)
//!     .n_steps(50)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! let mc = price_monte_carlo(&market, &config, McPayoff::American(OptionType::Put)).unwrap();
//!
//! assert!((mc.price - tree).abs() < 0.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod lattice;
pub mod mc;
pub mod path_dependent;
pub mod rng;
