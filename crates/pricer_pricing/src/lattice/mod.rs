//! Lattice pricing.
//!
//! - [`BinomialTree`]: CRR tree for European and American vanilla options
//!   with proportional discrete dividends
//!
//! Barrier, lookback and Asian payoffs are not priced on the lattice.

mod binomial;

pub use binomial::{BinomialTree, MAX_TREE_STEPS};

use pricer_core::types::{ExerciseStyle, MarketParameters, OptionType, PricingError};
use tracing::warn;

/// Prices a vanilla option on an `n_steps` CRR tree.
///
/// # Errors
///
/// - `InvalidParameter` for invalid market data or step count
/// - `InconsistentModel` if the risk-neutral probability leaves `(0, 1)`
///
/// # Examples
///
/// ```
/// use pricer_core::types::{ExerciseStyle, MarketParameters, OptionType};
/// use pricer_pricing::lattice::price_binomial;
///
/// let market = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2);
/// let call = price_binomial(&market, 1_000, OptionType::Call, ExerciseStyle::European).unwrap();
/// assert!((call - 9.925).abs() < 0.01);
/// ```
pub fn price_binomial(
    params: &MarketParameters,
    n_steps: usize,
    option_type: OptionType,
    exercise: ExerciseStyle,
) -> Result<f64, PricingError> {
    BinomialTree::new(n_steps)
        .and_then(|tree| tree.price(params, option_type, exercise))
        .map_err(|err| {
            warn!(error = %err, n_steps, %option_type, %exercise, "binomial pricing rejected");
            err
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_rejects_zero_steps() {
        let market = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2);
        let err = price_binomial(&market, 0, OptionType::Put, ExerciseStyle::American).unwrap_err();
        assert_eq!(err.parameter(), Some("n_steps"));
    }

    #[test]
    fn test_facade_rejects_bad_market() {
        let market = MarketParameters::new(100.0, 100.0, 0.0, 0.04, 0.2);
        let err = price_binomial(&market, 100, OptionType::Put, ExerciseStyle::European).unwrap_err();
        assert_eq!(err.parameter(), Some("maturity"));
    }
}
