//! Geometric average Asian option analytical pricing.
//!
//! The geometric average of lognormal prices is itself lognormal, so the
//! option reduces to a Black-Scholes-style formula on the average.
//!
//! # Mathematical Background
//!
//! ```text
//! G = (∏_{i=1}^{n} S_{t_i})^{1/n},    t_i = i·T/n
//! ```
//!
//! `ln G` is normal with
//!
//! ```text
//! μ = ln S + (r - σ²/2)·T·(n+1)/(2n)
//! v = σ²·T·(n+1)(2n+1)/(6n²)
//! ```
//!
//! and for continuous sampling (`n → ∞`, Kemna-Vorst 1990)
//! `μ = ln S + (r - σ²/2)·T/2`, `v = σ²T/3`, i.e. `σ_G = σ/√3`.
//!
//! ```text
//! Call = e^{-rT} [e^{μ + v/2} N(d1) - K N(d2)]
//! Put  = e^{-rT} [K N(-d2) - e^{μ + v/2} N(-d1)]
//! d1 = (μ - ln K + v)/√v,  d2 = d1 - √v
//! ```
//!
//! With `n = 1` the average is the terminal price and the formula is
//! Black-Scholes.

use num_traits::Float;
use pricer_core::types::{OptionType, PricingError};

use super::distributions::norm_cdf;

/// How the geometric average is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AveragingSchedule {
    /// Continuous average over `[0, T]`.
    Continuous,
    /// `n` equally spaced fixings at `T/n, 2T/n, ..., T`.
    Discrete(usize),
}

/// Result from geometric Asian option pricing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricAsianResult<T: Float> {
    /// Option price
    pub price: T,
    /// Volatility of the average, `sqrt(v / T)`
    pub adjusted_volatility: T,
    /// Undiscounted expectation of the average, `e^{μ + v/2}`
    pub average_forward: T,
    /// d1 parameter
    pub d1: T,
    /// d2 parameter
    pub d2: T,
}

/// Mean and variance of `ln G`.
fn log_average_moments<T: Float>(
    spot: T,
    rate: T,
    volatility: T,
    maturity: T,
    schedule: AveragingSchedule,
) -> Result<(T, T), PricingError> {
    let half = T::from(0.5).unwrap();
    let vol_sq = volatility * volatility;
    let drift = (rate - half * vol_sq) * maturity;

    match schedule {
        AveragingSchedule::Continuous => {
            let three = T::from(3.0).unwrap();
            Ok((spot.ln() + half * drift, vol_sq * maturity / three))
        }
        AveragingSchedule::Discrete(0) => Err(PricingError::invalid(
            "fixings",
            "discrete averaging needs at least one fixing",
        )),
        AveragingSchedule::Discrete(n) => {
            let n = T::from(n).unwrap();
            let one = T::one();
            let two = T::from(2.0).unwrap();
            let six = T::from(6.0).unwrap();
            let mean = spot.ln() + drift * (n + one) / (two * n);
            let variance = vol_sq * maturity * (n + one) * (two * n + one) / (six * n * n);
            Ok((mean, variance))
        }
    }
}

/// Prices a geometric average Asian option with detailed output.
///
/// # Errors
/// `PricingError::InvalidParameter` for non-positive spot, strike,
/// volatility or maturity, a non-finite rate, or zero fixings.
pub fn geometric_asian_with_details<T: Float>(
    spot: T,
    strike: T,
    rate: T,
    volatility: T,
    maturity: T,
    schedule: AveragingSchedule,
    option_type: OptionType,
) -> Result<GeometricAsianResult<T>, PricingError> {
    let zero = T::zero();
    if spot <= zero || !spot.is_finite() {
        return Err(PricingError::invalid("spot", "must be positive"));
    }
    if strike <= zero || !strike.is_finite() {
        return Err(PricingError::invalid(
            "strike",
            "must be positive for the geometric average formula",
        ));
    }
    if volatility <= zero || !volatility.is_finite() {
        return Err(PricingError::invalid("volatility", "must be positive"));
    }
    if maturity <= zero || !maturity.is_finite() {
        return Err(PricingError::invalid("maturity", "must be positive"));
    }
    if !rate.is_finite() {
        return Err(PricingError::invalid("rate", "must be finite"));
    }

    let half = T::from(0.5).unwrap();
    let (mean, variance) = log_average_moments(spot, rate, volatility, maturity, schedule)?;
    let std_dev = variance.sqrt();

    let d1 = (mean - strike.ln() + variance) / std_dev;
    let d2 = d1 - std_dev;
    let average_forward = (mean + half * variance).exp();
    let discount = (-rate * maturity).exp();

    let price = match option_type {
        OptionType::Call => discount * (average_forward * norm_cdf(d1) - strike * norm_cdf(d2)),
        OptionType::Put => discount * (strike * norm_cdf(-d2) - average_forward * norm_cdf(-d1)),
    };

    Ok(GeometricAsianResult {
        price: price.max(zero),
        adjusted_volatility: (variance / maturity).sqrt(),
        average_forward,
        d1,
        d2,
    })
}

/// Prices a geometric average Asian option.
///
/// # Example
///
/// ```rust
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::asian::{geometric_asian, AveragingSchedule};
///
/// let price = geometric_asian(
///     100.0_f64, 100.0, 0.04, 0.2, 1.0,
///     AveragingSchedule::Discrete(12),
///     OptionType::Call,
/// ).unwrap();
/// assert!((price - 5.685).abs() < 1e-3);
/// ```
#[inline]
pub fn geometric_asian<T: Float>(
    spot: T,
    strike: T,
    rate: T,
    volatility: T,
    maturity: T,
    schedule: AveragingSchedule,
    option_type: OptionType,
) -> Result<T, PricingError> {
    geometric_asian_with_details(spot, strike, rate, volatility, maturity, schedule, option_type)
        .map(|result| result.price)
}

/// Continuously sampled geometric Asian call (Kemna-Vorst).
#[inline]
pub fn geometric_asian_call<T: Float>(
    spot: T,
    strike: T,
    rate: T,
    volatility: T,
    maturity: T,
) -> Result<T, PricingError> {
    geometric_asian(
        spot,
        strike,
        rate,
        volatility,
        maturity,
        AveragingSchedule::Continuous,
        OptionType::Call,
    )
}

/// Continuously sampled geometric Asian put (Kemna-Vorst).
#[inline]
pub fn geometric_asian_put<T: Float>(
    spot: T,
    strike: T,
    rate: T,
    volatility: T,
    maturity: T,
) -> Result<T, PricingError> {
    geometric_asian(
        spot,
        strike,
        rate,
        volatility,
        maturity,
        AveragingSchedule::Continuous,
        OptionType::Put,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use approx::assert_relative_eq;

    // ========================================================================
    // Reference Value Tests
    // ========================================================================

    #[test]
    fn test_reference_value_kemna_vorst() {
        // S=100, K=100, r=0.05, σ=0.2, T=1
        let call = geometric_asian_call(100.0_f64, 100.0, 0.05, 0.2, 1.0).unwrap();
        let put = geometric_asian_put(100.0_f64, 100.0, 0.05, 0.2, 1.0).unwrap();
        assert_relative_eq!(call, 5.546819, epsilon = 1e-5);
        assert_relative_eq!(put, 3.463332, epsilon = 1e-5);
    }

    #[test]
    fn test_discrete_reference_values() {
        let call = geometric_asian(
            100.0_f64,
            100.0,
            0.04,
            0.2,
            1.0,
            AveragingSchedule::Discrete(12),
            OptionType::Call,
        )
        .unwrap();
        let put = geometric_asian(
            100.0_f64,
            100.0,
            0.04,
            0.2,
            1.0,
            AveragingSchedule::Discrete(12),
            OptionType::Put,
        )
        .unwrap();
        assert_relative_eq!(call, 5.685172, epsilon = 1e-5);
        assert_relative_eq!(put, 3.905214, epsilon = 1e-5);
    }

    #[test]
    fn test_single_fixing_is_black_scholes() {
        let bs = BlackScholes::new(100.0_f64, 0.04, 0.2).unwrap();
        for (strike, option_type) in [(90.0, OptionType::Call), (110.0, OptionType::Put)] {
            let asian = geometric_asian(
                100.0_f64,
                strike,
                0.04,
                0.2,
                1.0,
                AveragingSchedule::Discrete(1),
                option_type,
            )
            .unwrap();
            assert_relative_eq!(asian, bs.price(strike, 1.0, option_type), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_many_fixings_approach_continuous() {
        let continuous = geometric_asian_call(100.0_f64, 100.0, 0.04, 0.2, 1.0).unwrap();
        let discrete = geometric_asian(
            100.0_f64,
            100.0,
            0.04,
            0.2,
            1.0,
            AveragingSchedule::Discrete(10_000),
            OptionType::Call,
        )
        .unwrap();
        assert_relative_eq!(discrete, continuous, epsilon = 1e-3);
    }

    #[test]
    fn test_adjusted_volatility() {
        let details = geometric_asian_with_details(
            100.0_f64,
            100.0,
            0.05,
            0.3,
            2.0,
            AveragingSchedule::Continuous,
            OptionType::Call,
        )
        .unwrap();
        assert_relative_eq!(details.adjusted_volatility, 0.3 / 3.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(details.d2, details.d1 - 0.3 / 3.0_f64.sqrt() * 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_put_call_parity() {
        for schedule in [AveragingSchedule::Continuous, AveragingSchedule::Discrete(52)] {
            for strike in [80.0, 100.0, 120.0] {
                let call = geometric_asian_with_details(
                    100.0_f64,
                    strike,
                    0.03,
                    0.25,
                    1.5,
                    schedule,
                    OptionType::Call,
                )
                .unwrap();
                let put = geometric_asian(
                    100.0_f64,
                    strike,
                    0.03,
                    0.25,
                    1.5,
                    schedule,
                    OptionType::Put,
                )
                .unwrap();
                let forward = (-0.03_f64 * 1.5).exp() * (call.average_forward - strike);
                assert_relative_eq!(call.price - put, forward, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_cheaper_than_european() {
        let asian = geometric_asian_call(100.0_f64, 100.0, 0.05, 0.2, 1.0).unwrap();
        let european = BlackScholes::new(100.0_f64, 0.05, 0.2)
            .unwrap()
            .price_call(100.0, 1.0);
        assert!(asian < european);
    }

    #[test]
    fn test_monotonic_in_spot() {
        let mut prev_call = 0.0;
        let mut prev_put = f64::INFINITY;
        for i in 1..=20 {
            let spot = 60.0 + 4.0 * i as f64;
            let call = geometric_asian_call(spot, 100.0, 0.04, 0.2, 1.0).unwrap();
            let put = geometric_asian_put(spot, 100.0, 0.04, 0.2, 1.0).unwrap();
            assert!(call > prev_call);
            assert!(put < prev_put);
            prev_call = call;
            prev_put = put;
        }
    }

    // ========================================================================
    // Invalid Input Tests
    // ========================================================================

    #[test]
    fn test_invalid_inputs() {
        assert!(geometric_asian_call(0.0_f64, 100.0, 0.04, 0.2, 1.0).is_err());
        assert!(geometric_asian_call(100.0_f64, 0.0, 0.04, 0.2, 1.0).is_err());
        assert!(geometric_asian_call(100.0_f64, 100.0, 0.04, 0.0, 1.0).is_err());
        assert!(geometric_asian_call(100.0_f64, 100.0, 0.04, 0.2, 0.0).is_err());
        let err = geometric_asian(
            100.0_f64,
            100.0,
            0.04,
            0.2,
            1.0,
            AveragingSchedule::Discrete(0),
            OptionType::Call,
        )
        .unwrap_err();
        assert_eq!(err.parameter(), Some("fixings"));
    }

    #[test]
    fn test_f32_compatibility() {
        let price = geometric_asian_call(100.0_f32, 100.0, 0.05, 0.2, 1.0).unwrap();
        assert!((price - 5.5468).abs() < 1e-2);
    }
}
