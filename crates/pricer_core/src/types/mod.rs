//! Core value types for option pricing.
//!
//! This module provides:
//! - `market`: [`MarketParameters`] and the proportional [`DividendSchedule`]
//! - `option`: payoff and exercise selectors ([`OptionType`], [`ExerciseStyle`])
//! - `estimate`: [`PriceEstimate`], a price plus its standard error
//! - `error`: the shared [`PricingError`] taxonomy
//!
//! Every type here is an immutable value. Pricers take them by reference and
//! return new values; nothing is mutated during a pricing call.

pub mod error;
pub mod estimate;
pub mod market;
pub mod option;

// Re-export commonly used types at module level
pub use error::PricingError;
pub use estimate::PriceEstimate;
pub use market::{Dividend, DividendSchedule, MarketParameters};
pub use option::{ExerciseStyle, OptionType};
