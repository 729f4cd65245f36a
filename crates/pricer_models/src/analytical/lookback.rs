//! Floating-strike lookback options (Goldman-Sosin-Gatto).
//!
//! - **Call** pays `S_T - min(S_t)`
//! - **Put** pays `max(S_t) - S_T`
//!
//! Monitoring is continuous over `[0, T]` and starts at the spot unless a
//! previously observed extreme is supplied.
//!
//! ## Formulas (no dividend yield, carry `b = r`)
//!
//! Call:
//! `S·N(a₁) - m·e^(-rT)·N(a₂) + S·e^(-rT)·σ²/(2r)·[e^Y·N(-a₃) - e^(rT)·N(-a₁)]`
//!
//! with `a₁ = (ln(S/m) + (r + σ²/2)T)/(σ√T)`, `a₂ = a₁ - σ√T`,
//! `a₃ = a₁ - 2r√T/σ`, `Y = -2r·ln(S/m)/σ²`. The put is symmetric in the
//! running maximum `M`.
//!
//! The `σ²/(2r)` factor is singular at `r = 0`; there the price is the mean
//! of the formula evaluated at `±ε`.

use num_traits::Float;
use pricer_core::types::{OptionType, PricingError};

use super::distributions::norm_cdf;

/// Rates closer to zero than this use the symmetric limit.
const ZERO_RATE_THRESHOLD: f64 = 1.0e-8;

/// Offset used for the symmetric limit.
const ZERO_RATE_BUMP: f64 = 1.0e-5;

/// Floating-strike lookback option.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::FloatingLookback;
///
/// let lookback = FloatingLookback::new(OptionType::Call);
/// let price = lookback.price(100.0_f64, 0.04, 0.2, 1.0).unwrap();
/// assert!((price - 16.754).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingLookback<T: Float> {
    option_type: OptionType,
    observed_extreme: Option<T>,
}

impl<T: Float> FloatingLookback<T> {
    /// Creates a lookback with monitoring starting at the spot.
    pub fn new(option_type: OptionType) -> Self {
        Self {
            option_type,
            observed_extreme: None,
        }
    }

    /// Sets the minimum (call) or maximum (put) observed so far.
    pub fn with_observed_extreme(mut self, extreme: T) -> Self {
        self.observed_extreme = Some(extreme);
        self
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Prices the option.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for non-positive spot, volatility or
    /// maturity, a non-finite rate, or an observed extreme on the wrong
    /// side of the spot.
    pub fn price(&self, spot: T, rate: T, volatility: T, maturity: T) -> Result<T, PricingError> {
        let zero = T::zero();
        if spot <= zero || !spot.is_finite() {
            return Err(PricingError::invalid("spot", "must be positive"));
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

        let extreme = self.observed_extreme.unwrap_or(spot);
        match self.option_type {
            OptionType::Call => {
                if extreme <= zero || extreme > spot {
                    return Err(PricingError::invalid(
                        "observed_extreme",
                        "running minimum must lie in (0, spot]",
                    ));
                }
                Ok(call_formula(spot, extreme, rate, volatility, maturity))
            }
            OptionType::Put => {
                if extreme < spot || !extreme.is_finite() {
                    return Err(PricingError::invalid(
                        "observed_extreme",
                        "running maximum must be at least the spot",
                    ));
                }
                Ok(put_formula(spot, extreme, rate, volatility, maturity))
            }
        }
    }
}

fn call_formula<T: Float>(spot: T, s_min: T, rate: T, vol: T, expiry: T) -> T {
    let half = T::from(0.5).unwrap();
    let two = T::from(2.0).unwrap();

    if rate.abs() < T::from(ZERO_RATE_THRESHOLD).unwrap() {
        let eps = T::from(ZERO_RATE_BUMP).unwrap();
        let hi = call_formula(spot, s_min, eps, vol, expiry);
        let lo = call_formula(spot, s_min, -eps, vol, expiry);
        return half * (hi + lo);
    }

    let vol_sq = vol * vol;
    let sqrt_t = expiry.sqrt();
    let ln_ratio = (spot / s_min).ln();

    let a1 = (ln_ratio + (rate + half * vol_sq) * expiry) / (vol * sqrt_t);
    let a2 = a1 - vol * sqrt_t;
    let a3 = a1 - two * rate * sqrt_t / vol;
    let y = -two * rate / vol_sq * ln_ratio;

    let discount = (-rate * expiry).exp();
    let phi = vol_sq / (two * rate);

    spot * norm_cdf(a1) - s_min * discount * norm_cdf(a2)
        + spot
            * discount
            * phi
            * (y.exp() * norm_cdf(-a3) - (rate * expiry).exp() * norm_cdf(-a1))
}

fn put_formula<T: Float>(spot: T, s_max: T, rate: T, vol: T, expiry: T) -> T {
    let half = T::from(0.5).unwrap();
    let two = T::from(2.0).unwrap();

    if rate.abs() < T::from(ZERO_RATE_THRESHOLD).unwrap() {
        let eps = T::from(ZERO_RATE_BUMP).unwrap();
        let hi = put_formula(spot, s_max, eps, vol, expiry);
        let lo = put_formula(spot, s_max, -eps, vol, expiry);
        return half * (hi + lo);
    }

    let vol_sq = vol * vol;
    let sqrt_t = expiry.sqrt();
    let ln_ratio = (spot / s_max).ln();

    let b1 = (ln_ratio + (rate + half * vol_sq) * expiry) / (vol * sqrt_t);
    let b2 = b1 - vol * sqrt_t;
    let b3 = b1 - two * rate * sqrt_t / vol;
    let y = -two * rate / vol_sq * ln_ratio;

    let discount = (-rate * expiry).exp();
    let phi = vol_sq / (two * rate);

    s_max * discount * norm_cdf(-b2) - spot * norm_cdf(-b1)
        + spot
            * discount
            * phi
            * ((rate * expiry).exp() * norm_cdf(b1) - y.exp() * norm_cdf(b3))
}

/// Prices a floating-strike lookback with monitoring from the spot.
#[inline]
pub fn floating_lookback<T: Float>(
    spot: T,
    rate: T,
    volatility: T,
    maturity: T,
    option_type: OptionType,
) -> Result<T, PricingError> {
    FloatingLookback::new(option_type).price(spot, rate, volatility, maturity)
}
