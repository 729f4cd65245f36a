//! # pricer_core: Shared Types for the Option Pricing Engines
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace. It provides the value
//! types every pricer consumes and produces:
//! - Market and contract parameters: `MarketParameters`, `DividendSchedule` (`types::market`)
//! - Payoff and exercise selectors: `OptionType`, `ExerciseStyle` (`types::option`)
//! - Results: `PriceEstimate` (`types::estimate`)
//! - Error taxonomy: `PricingError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{MarketParameters, OptionType, PriceEstimate};
//!
//! let params = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2);
//! params.validate().unwrap();
//!
//! let payoff = OptionType::Call.intrinsic(105.0, params.strike);
//! assert_eq!(payoff, 5.0);
//!
//! let estimate = PriceEstimate::new(9.93, 0.02);
//! assert!(estimate.contains(9.925, 1.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for all value types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
