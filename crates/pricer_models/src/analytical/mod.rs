//! Closed-form option pricing under Black-Scholes dynamics.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model for European calls and puts
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//! - Continuously monitored single-barrier options
//! - Floating-strike lookback options
//! - Geometric average Asian options (continuous and discrete sampling)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: Formulas run in `f32` or `f64`
//! - **Validated inputs**: Rejected parameters surface as [`PricingError`],
//!   never as NaN prices
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy in the tails
//!
//! [`price_closed_form`] is the entry point used by the command line and by
//! the cross-method tests.

pub mod asian;
pub mod barrier;
pub mod black_scholes;
pub mod distributions;
pub mod lookback;

pub use asian::{geometric_asian, AveragingSchedule, GeometricAsianResult};
pub use barrier::{barrier_price, BarrierDirection, BarrierParams, BarrierType, KnockType};
pub use black_scholes::{BlackScholes, Greeks};
pub use distributions::{norm_cdf, norm_pdf};
pub use lookback::{floating_lookback, FloatingLookback};

use pricer_core::types::{ExerciseStyle, MarketParameters, OptionType, PricingError};
use tracing::warn;

/// Instruments with a closed-form price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosedFormInstrument {
    /// European call or put. American exercise has no closed form.
    Vanilla {
        /// Call or put
        option_type: OptionType,
        /// Exercise style
        exercise: ExerciseStyle,
    },
    /// Continuously monitored single-barrier option on `params.barrier`.
    Barrier {
        /// Direction, knock type and payoff
        barrier_type: BarrierType,
    },
    /// Floating-strike lookback monitored from the spot.
    LookbackFloating {
        /// Call pays `S_T - min`, put pays `max - S_T`
        option_type: OptionType,
    },
    /// Geometric average Asian option.
    GeometricAsian {
        /// Call or put
        option_type: OptionType,
        /// Number of equally spaced fixings, `None` for continuous sampling
        fixings: Option<usize>,
    },
}

impl ClosedFormInstrument {
    /// European vanilla shorthand.
    pub fn european(option_type: OptionType) -> Self {
        Self::Vanilla {
            option_type,
            exercise: ExerciseStyle::European,
        }
    }
}

/// Prices `instrument` under `params`.
///
/// European vanillas honour the proportional dividend schedule by pricing on
/// the dividend-adjusted spot `S0 · ∏(1 - δ)`. The path-dependent formulas
/// assume no dividends.
///
/// # Errors
/// - `InvalidParameter` if `params` fail validation, a barrier instrument
///   has no barrier level, or an up-barrier call has `K >= B`
/// - `UnsupportedPayoff` for American exercise or dividends on a
///   path-dependent instrument
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketParameters, OptionType};
/// use pricer_models::analytical::{price_closed_form, ClosedFormInstrument};
///
/// let params = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2);
/// let call = price_closed_form(&params, ClosedFormInstrument::european(OptionType::Call)).unwrap();
/// assert!((call - 9.925).abs() < 1e-3);
/// ```
pub fn price_closed_form(
    params: &MarketParameters,
    instrument: ClosedFormInstrument,
) -> Result<f64, PricingError> {
    price_validated(params, instrument).map_err(|err| {
        warn!(?instrument, %err, "closed-form pricing rejected");
        err
    })
}

fn price_validated(
    params: &MarketParameters,
    instrument: ClosedFormInstrument,
) -> Result<f64, PricingError> {
    params.validate()?;

    if !matches!(instrument, ClosedFormInstrument::Vanilla { .. }) && !params.dividends.is_empty()
    {
        return Err(PricingError::unsupported(
            "closed-form path-dependent formulas assume no dividends",
        ));
    }

    match instrument {
        ClosedFormInstrument::Vanilla {
            option_type,
            exercise,
        } => {
            if exercise.allows_early_exercise() {
                return Err(PricingError::unsupported(
                    "american exercise has no closed-form price",
                ));
            }
            let spot = params.spot * params.dividends.retention_factor(params.maturity);
            let model = BlackScholes::new(spot, params.rate, params.volatility)?;
            Ok(model.price(params.strike, params.maturity, option_type))
        }
        ClosedFormInstrument::Barrier { barrier_type } => {
            let barrier = params.require_barrier()?;
            barrier_price(&BarrierParams::new(
                params.spot,
                params.strike,
                barrier,
                params.rate,
                params.volatility,
                params.maturity,
                barrier_type,
            ))
        }
        ClosedFormInstrument::LookbackFloating { option_type } => floating_lookback(
            params.spot,
            params.rate,
            params.volatility,
            params.maturity,
            option_type,
        ),
        ClosedFormInstrument::GeometricAsian {
            option_type,
            fixings,
        } => {
            let schedule = fixings.map_or(AveragingSchedule::Continuous, AveragingSchedule::Discrete);
            geometric_asian(
                params.spot,
                params.strike,
                params.rate,
                params.volatility,
                params.maturity,
                schedule,
                option_type,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::DividendSchedule;

    fn reference() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2)
    }

    #[test]
    fn test_vanilla_reference() {
        let params = reference();
        let call = price_closed_form(&params, ClosedFormInstrument::european(OptionType::Call));
        let put = price_closed_form(&params, ClosedFormInstrument::european(OptionType::Put));
        assert_relative_eq!(call.unwrap(), 9.925, epsilon = 1e-3);
        assert_relative_eq!(put.unwrap(), 6.004, epsilon = 1e-3);
    }

    #[test]
    fn test_american_is_unsupported() {
        let err = price_closed_form(
            &reference(),
            ClosedFormInstrument::Vanilla {
                option_type: OptionType::Put,
                exercise: ExerciseStyle::American,
            },
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedPayoff(_)));
    }

    #[test]
    fn test_barrier_requires_level() {
        let instrument = ClosedFormInstrument::Barrier {
            barrier_type: BarrierType::up_out_call(),
        };
        let err = price_closed_form(&reference(), instrument).unwrap_err();
        assert_eq!(err.parameter(), Some("barrier"));

        let price = price_closed_form(&reference().with_barrier(115.0), instrument).unwrap();
        assert_relative_eq!(price, 0.481, epsilon = 0.01);
    }

    #[test]
    fn test_up_call_strike_above_barrier_rejected() {
        let params = MarketParameters::new(100.0, 120.0, 1.0, 0.04, 0.2).with_barrier(115.0);
        let instrument = ClosedFormInstrument::Barrier {
            barrier_type: BarrierType::up_in_call(),
        };
        assert!(matches!(
            price_closed_form(&params, instrument),
            Err(PricingError::InvalidParameter { name: "barrier", .. })
        ));
    }

    #[test]
    fn test_invalid_market_rejected_before_pricing() {
        let params = reference().with_volatility(-0.2);
        let err = price_closed_form(&params, ClosedFormInstrument::european(OptionType::Call))
            .unwrap_err();
        assert_eq!(err.parameter(), Some("volatility"));
    }

    #[test]
    fn test_european_with_dividends_uses_adjusted_spot() {
        let params = reference().with_dividends(DividendSchedule::from_pairs(&[(0.5, 0.05)]));
        let price =
            price_closed_form(&params, ClosedFormInstrument::european(OptionType::Call)).unwrap();
        let expected = BlackScholes::new(95.0, 0.04, 0.2)
            .unwrap()
            .price_call(100.0, 1.0);
        assert_relative_eq!(price, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_path_dependent_with_dividends_unsupported() {
        let params = reference().with_dividends(DividendSchedule::from_pairs(&[(0.5, 0.05)]));
        let err = price_closed_form(
            &params,
            ClosedFormInstrument::LookbackFloating {
                option_type: OptionType::Call,
            },
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedPayoff(_)));
    }

    #[test]
    fn test_lookback_and_asian_dispatch() {
        let params = reference();
        let lookback = price_closed_form(
            &params,
            ClosedFormInstrument::LookbackFloating {
                option_type: OptionType::Call,
            },
        )
        .unwrap();
        assert_relative_eq!(lookback, 16.7537, epsilon = 1e-3);

        let asian = price_closed_form(
            &params,
            ClosedFormInstrument::GeometricAsian {
                option_type: OptionType::Call,
                fixings: Some(12),
            },
        )
        .unwrap();
        assert_relative_eq!(asian, 5.6852, epsilon = 1e-3);
    }
}
