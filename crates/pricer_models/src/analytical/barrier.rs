//! Barrier option analytical pricing.
//!
//! Implements closed-form solutions for continuously monitored European
//! barrier options on a non-dividend-paying asset.
//!
//! # Barrier Types
//!
//! There are 8 types of single-barrier options:
//! - **Down-and-In/Out Call**: Barrier below spot
//! - **Down-and-In/Out Put**: Barrier below spot
//! - **Up-and-In/Out Call**: Barrier above spot
//! - **Up-and-In/Out Put**: Barrier above spot
//!
//! # Key Relationship
//!
//! **In-Out Parity**: Knock-In + Knock-Out = Vanilla
//!
//! # Formulas
//!
//! With `λ = (r + σ²/2)/σ²` and
//! - `y  = ln(H²/(S·K))/(σ√T) + λσ√T`
//! - `x₁ = ln(S/H)/(σ√T) + λσ√T`
//! - `y₁ = ln(H/S)/(σ√T) + λσ√T`
//!
//! each knock-in (or knock-out) value is a combination of vanilla-like terms
//! weighted by the reflection factors `(H/S)^{2λ}` and `(H/S)^{2λ-2}`. The
//! counterpart follows from in-out parity.

use num_traits::Float;
use pricer_core::types::{OptionType, PricingError};

use super::black_scholes::BlackScholes;
use super::distributions::norm_cdf;

/// Barrier option direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarrierDirection {
    /// Barrier is above the current spot price
    Up,
    /// Barrier is below the current spot price
    Down,
}

/// Barrier option knock type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnockType {
    /// Option is activated (knocked in) when barrier is hit
    In,
    /// Option is deactivated (knocked out) when barrier is hit
    Out,
}

/// Complete barrier type specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BarrierType {
    /// Direction of barrier (up or down)
    pub direction: BarrierDirection,
    /// Knock type (in or out)
    pub knock: KnockType,
    /// Option type (call or put)
    pub option_type: OptionType,
}

impl BarrierType {
    /// Creates a new barrier type specification.
    pub fn new(direction: BarrierDirection, knock: KnockType, option_type: OptionType) -> Self {
        Self {
            direction,
            knock,
            option_type,
        }
    }

    /// Down-and-In Call
    pub fn down_in_call() -> Self {
        Self::new(BarrierDirection::Down, KnockType::In, OptionType::Call)
    }
    /// Down-and-Out Call
    pub fn down_out_call() -> Self {
        Self::new(BarrierDirection::Down, KnockType::Out, OptionType::Call)
    }
    /// Down-and-In Put
    pub fn down_in_put() -> Self {
        Self::new(BarrierDirection::Down, KnockType::In, OptionType::Put)
    }
    /// Down-and-Out Put
    pub fn down_out_put() -> Self {
        Self::new(BarrierDirection::Down, KnockType::Out, OptionType::Put)
    }
    /// Up-and-In Call
    pub fn up_in_call() -> Self {
        Self::new(BarrierDirection::Up, KnockType::In, OptionType::Call)
    }
    /// Up-and-Out Call
    pub fn up_out_call() -> Self {
        Self::new(BarrierDirection::Up, KnockType::Out, OptionType::Call)
    }
    /// Up-and-In Put
    pub fn up_in_put() -> Self {
        Self::new(BarrierDirection::Up, KnockType::In, OptionType::Put)
    }
    /// Up-and-Out Put
    pub fn up_out_put() -> Self {
        Self::new(BarrierDirection::Up, KnockType::Out, OptionType::Put)
    }

    /// Returns the same contract with the opposite knock type.
    pub fn counterpart(&self) -> Self {
        let knock = match self.knock {
            KnockType::In => KnockType::Out,
            KnockType::Out => KnockType::In,
        };
        Self { knock, ..*self }
    }

    /// Returns true if `spot` is on or beyond the barrier.
    #[inline]
    pub fn is_breached<T: Float>(&self, spot: T, barrier: T) -> bool {
        match self.direction {
            BarrierDirection::Up => spot >= barrier,
            BarrierDirection::Down => spot <= barrier,
        }
    }
}

impl std::fmt::Display for BarrierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            BarrierDirection::Up => "up",
            BarrierDirection::Down => "down",
        };
        let knock = match self.knock {
            KnockType::In => "in",
            KnockType::Out => "out",
        };
        write!(f, "{}-and-{} {}", direction, knock, self.option_type)
    }
}

/// Parameters for barrier option pricing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierParams<T: Float> {
    /// Spot price
    pub spot: T,
    /// Strike price
    pub strike: T,
    /// Barrier level
    pub barrier: T,
    /// Risk-free rate
    pub rate: T,
    /// Volatility
    pub volatility: T,
    /// Time to maturity
    pub maturity: T,
    /// Barrier type specification
    pub barrier_type: BarrierType,
}

impl<T: Float> BarrierParams<T> {
    /// Creates new barrier option parameters.
    pub fn new(
        spot: T,
        strike: T,
        barrier: T,
        rate: T,
        volatility: T,
        maturity: T,
        barrier_type: BarrierType,
    ) -> Self {
        Self {
            spot,
            strike,
            barrier,
            rate,
            volatility,
            maturity,
            barrier_type,
        }
    }

    fn validate(&self) -> Result<(), PricingError> {
        let zero = T::zero();
        if self.strike < zero || !self.strike.is_finite() {
            return Err(PricingError::invalid("strike", "must be non-negative"));
        }
        if self.barrier <= zero || !self.barrier.is_finite() {
            return Err(PricingError::invalid("barrier", "must be positive"));
        }
        if self.maturity <= zero || !self.maturity.is_finite() {
            return Err(PricingError::invalid("maturity", "must be positive"));
        }
        if self.barrier_type.direction == BarrierDirection::Up
            && self.barrier_type.option_type == OptionType::Call
            && self.strike >= self.barrier
        {
            return Err(PricingError::invalid(
                "barrier",
                "up-barrier calls require strike < barrier",
            ));
        }
        Ok(())
    }
}

/// Intermediate quantities shared by the eight barrier formulas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierResult<T: Float> {
    /// Option price
    pub price: T,
    /// λ parameter
    pub lambda: T,
    /// y parameter
    pub y: T,
    /// x1 parameter
    pub x1: T,
    /// y1 parameter
    pub y1: T,
}

/// Price a barrier option.
///
/// # Errors
/// `PricingError::InvalidParameter` for non-positive spot, volatility,
/// maturity or barrier, a negative strike, or an up-barrier call with
/// `strike >= barrier`.
pub fn barrier_price<T: Float>(params: &BarrierParams<T>) -> Result<T, PricingError> {
    barrier_price_with_details(params).map(|result| result.price)
}

/// Price a barrier option with detailed output.
pub fn barrier_price_with_details<T: Float>(
    params: &BarrierParams<T>,
) -> Result<BarrierResult<T>, PricingError> {
    params.validate()?;
    let model = BlackScholes::new(params.spot, params.rate, params.volatility)?;

    let two = T::from(2.0).unwrap();
    let s = params.spot;
    let k = params.strike;
    let h = params.barrier;
    let vol = params.volatility;
    let t = params.maturity;

    let vol_sqrt_t = vol * t.sqrt();
    let vol_sq = vol * vol;

    let lambda = (params.rate + vol_sq / two) / vol_sq;
    let y = (h * h / (s * k)).ln() / vol_sqrt_t + lambda * vol_sqrt_t;
    let x1 = (s / h).ln() / vol_sqrt_t + lambda * vol_sqrt_t;
    let y1 = (h / s).ln() / vol_sqrt_t + lambda * vol_sqrt_t;

    let barrier_type = params.barrier_type;
    let vanilla = model.price(k, t, barrier_type.option_type);

    let price = if barrier_type.is_breached(s, h) {
        match barrier_type.knock {
            KnockType::In => vanilla,
            KnockType::Out => T::zero(),
        }
    } else {
        let terms = Terms::new(params, lambda, vol_sqrt_t);
        let knock_in = match (barrier_type.direction, barrier_type.option_type) {
            (BarrierDirection::Up, OptionType::Call) => terms.up_in_call(x1, y, y1),
            (BarrierDirection::Up, OptionType::Put) => {
                if h >= k {
                    terms.up_in_put_high_barrier(y)
                } else {
                    vanilla - terms.up_out_put_low_barrier(x1, y1)
                }
            }
            (BarrierDirection::Down, OptionType::Call) => {
                if h <= k {
                    terms.down_in_call_low_barrier(y)
                } else {
                    vanilla - terms.down_out_call_high_barrier(x1, y1)
                }
            }
            (BarrierDirection::Down, OptionType::Put) => {
                if h > k {
                    vanilla
                } else {
                    terms.down_in_put(x1, y, y1)
                }
            }
        };
        // Guard against rounding pushing either leg outside [0, vanilla]
        let knock_in = knock_in.max(T::zero()).min(vanilla);
        match barrier_type.knock {
            KnockType::In => knock_in,
            KnockType::Out => vanilla - knock_in,
        }
    };

    Ok(BarrierResult {
        price,
        lambda,
        y,
        x1,
        y1,
    })
}

/// Building blocks of the reflection formulas.
struct Terms<T: Float> {
    s: T,
    k_df: T,
    vol_sqrt_t: T,
    /// (H/S)^{2λ}
    reflect: T,
    /// (H/S)^{2λ-2}
    reflect_m2: T,
}

impl<T: Float> Terms<T> {
    fn new(params: &BarrierParams<T>, lambda: T, vol_sqrt_t: T) -> Self {
        let two = T::from(2.0).unwrap();
        let ratio = params.barrier / params.spot;
        Self {
            s: params.spot,
            k_df: params.strike * (-params.rate * params.maturity).exp(),
            vol_sqrt_t,
            reflect: ratio.powf(two * lambda),
            reflect_m2: ratio.powf(two * lambda - two),
        }
    }

    fn up_in_call(&self, x1: T, y: T, y1: T) -> T {
        let v = self.vol_sqrt_t;
        self.s * norm_cdf(x1) - self.k_df * norm_cdf(x1 - v)
            - self.s * self.reflect * (norm_cdf(-y) - norm_cdf(-y1))
            + self.k_df * self.reflect_m2 * (norm_cdf(-y + v) - norm_cdf(-y1 + v))
    }

    fn up_in_put_high_barrier(&self, y: T) -> T {
        let v = self.vol_sqrt_t;
        -self.s * self.reflect * norm_cdf(-y) + self.k_df * self.reflect_m2 * norm_cdf(-y + v)
    }

    fn up_out_put_low_barrier(&self, x1: T, y1: T) -> T {
        let v = self.vol_sqrt_t;
        -self.s * norm_cdf(-x1) + self.k_df * norm_cdf(-x1 + v)
            + self.s * self.reflect * norm_cdf(-y1)
            - self.k_df * self.reflect_m2 * norm_cdf(-y1 + v)
    }

    fn down_in_call_low_barrier(&self, y: T) -> T {
        let v = self.vol_sqrt_t;
        self.s * self.reflect * norm_cdf(y) - self.k_df * self.reflect_m2 * norm_cdf(y - v)
    }

    fn down_out_call_high_barrier(&self, x1: T, y1: T) -> T {
        let v = self.vol_sqrt_t;
        self.s * norm_cdf(x1) - self.k_df * norm_cdf(x1 - v)
            - self.s * self.reflect * norm_cdf(y1)
            + self.k_df * self.reflect_m2 * norm_cdf(y1 - v)
    }

    fn down_in_put(&self, x1: T, y: T, y1: T) -> T {
        let v = self.vol_sqrt_t;
        -self.s * norm_cdf(-x1) + self.k_df * norm_cdf(-x1 + v)
            + self.s * self.reflect * (norm_cdf(y) - norm_cdf(y1))
            - self.k_df * self.reflect_m2 * (norm_cdf(y - v) - norm_cdf(y1 - v))
    }
}

// Convenience functions

/// Price an up-and-out call option.
///
/// # Errors
/// `PricingError::InvalidParameter` if `strike >= barrier` or any market
/// input is out of range.
///
/// # Examples
/// ```
/// use pricer_models::analytical::barrier::up_out_call;
///
/// let price = up_out_call(100.0_f64, 100.0, 115.0, 0.04, 0.2, 1.0).unwrap();
/// assert!((price - 0.481).abs() < 0.01);
/// assert!(up_out_call(100.0_f64, 120.0, 115.0, 0.04, 0.2, 1.0).is_err());
/// ```
#[inline]
pub fn up_out_call<T: Float>(
    spot: T,
    strike: T,
    barrier: T,
    rate: T,
    volatility: T,
    maturity: T,
) -> Result<T, PricingError> {
    barrier_price(&BarrierParams::new(
        spot,
        strike,
        barrier,
        rate,
        volatility,
        maturity,
        BarrierType::up_out_call(),
    ))
}

/// Price an up-and-in call option.
#[inline]
pub fn up_in_call<T: Float>(
    spot: T,
    strike: T,
    barrier: T,
    rate: T,
    volatility: T,
    maturity: T,
) -> Result<T, PricingError> {
    barrier_price(&BarrierParams::new(
        spot,
        strike,
        barrier,
        rate,
        volatility,
        maturity,
        BarrierType::up_in_call(),
    ))
}

/// Price a down-and-out put option.
#[inline]
pub fn down_out_put<T: Float>(
    spot: T,
    strike: T,
    barrier: T,
    rate: T,
    volatility: T,
    maturity: T,
) -> Result<T, PricingError> {
    barrier_price(&BarrierParams::new(
        spot,
        strike,
        barrier,
        rate,
        volatility,
        maturity,
        BarrierType::down_out_put(),
    ))
}
