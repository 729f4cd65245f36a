//! Average-price (Asian) payoff.
//!
//! The average runs over the simulation dates `t_1..t_N`, so with `N` steps
//! the geometric variant matches the discretely sampled closed form with `N`
//! fixings.

use num_traits::Float;
use pricer_core::types::{OptionType, PricingError};

use super::payoff::vanilla_intrinsic;
use super::{PathDependentPayoff, PathObserver};

/// Averaging method of an Asian option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Averaging {
    /// `Σ S_i / N`
    #[default]
    Arithmetic,
    /// `(Π S_i)^{1/N}`
    Geometric,
}

impl std::fmt::Display for Averaging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Averaging::Arithmetic => write!(f, "arithmetic"),
            Averaging::Geometric => write!(f, "geometric"),
        }
    }
}

impl std::str::FromStr for Averaging {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arithmetic" => Ok(Averaging::Arithmetic),
            "geometric" => Ok(Averaging::Geometric),
            other => Err(PricingError::unsupported(format!(
                "unknown averaging '{}'",
                other
            ))),
        }
    }
}

/// Fixed-strike average-price payoff `max(±(A - K), 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsianPayoff<T: Float> {
    strike: T,
    option_type: OptionType,
    averaging: Averaging,
}

impl<T: Float> AsianPayoff<T> {
    /// Creates an average-price payoff.
    #[inline]
    pub fn new(strike: T, option_type: OptionType, averaging: Averaging) -> Self {
        Self {
            strike,
            option_type,
            averaging,
        }
    }

    /// Contract strike.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Averaging method.
    #[inline]
    pub fn averaging(&self) -> Averaging {
        self.averaging
    }

    /// Rejects a negative or non-finite strike.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.strike < T::zero() || !self.strike.is_finite() {
            return Err(PricingError::invalid(
                "strike",
                "must be non-negative and finite",
            ));
        }
        Ok(())
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for AsianPayoff<T> {
    #[inline]
    fn payoff(&self, observer: &PathObserver<T>) -> T {
        let average = match self.averaging {
            Averaging::Arithmetic => observer.arithmetic_average(),
            Averaging::Geometric => observer.geometric_average(),
        };
        vanilla_intrinsic(self.option_type, average, self.strike)
    }

    /// Averages are unaffected by monitoring corrections.
    fn on_grid(&self, _vol_sqrt_dt: T) -> Self {
        *self
    }
}
