//! Barrier option payoff.
//!
//! Knock-out payoffs pay the vanilla value unless the path touches the
//! barrier; knock-in payoffs pay it only if the path touches. The initial
//! spot is tested against the contract barrier and the simulated extremes
//! against the effective (possibly corrected) barrier.

use num_traits::Float;
use pricer_core::types::{OptionType, PricingError};
use pricer_models::analytical::{BarrierDirection, BarrierType, KnockType};

use super::payoff::vanilla_intrinsic;
use super::{Monitoring, PathDependentPayoff, PathObserver};

/// Single-barrier European payoff.
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::BarrierType;
/// use pricer_pricing::path_dependent::{
///     BarrierPayoff, Monitoring, PathDependentPayoff, PathObserver,
/// };
///
/// let payoff = BarrierPayoff::new(100.0, 115.0, BarrierType::up_out_call(), Monitoring::Discrete);
/// let survived = PathObserver::from_path(&[100.0, 108.0, 112.0]);
/// let knocked = PathObserver::from_path(&[100.0, 116.0, 112.0]);
///
/// assert_eq!(payoff.payoff(&survived), 12.0);
/// assert_eq!(payoff.payoff(&knocked), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierPayoff<T: Float> {
    strike: T,
    barrier: T,
    barrier_type: BarrierType,
    monitoring: Monitoring,
    /// Level actually compared against the path extreme.
    effective_barrier: T,
}

impl<T: Float> BarrierPayoff<T> {
    /// Creates a barrier payoff; the effective barrier equals `barrier`
    /// until the payoff is bound to a grid.
    #[inline]
    pub fn new(strike: T, barrier: T, barrier_type: BarrierType, monitoring: Monitoring) -> Self {
        Self {
            strike,
            barrier,
            barrier_type,
            monitoring,
            effective_barrier: barrier,
        }
    }

    /// Contract strike.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Contract barrier level.
    #[inline]
    pub fn barrier(&self) -> T {
        self.barrier
    }

    /// Barrier level after any continuity correction.
    #[inline]
    pub fn effective_barrier(&self) -> T {
        self.effective_barrier
    }

    /// Direction, knock type and option type.
    #[inline]
    pub fn barrier_type(&self) -> BarrierType {
        self.barrier_type
    }

    /// Monitoring mode.
    #[inline]
    pub fn monitoring(&self) -> Monitoring {
        self.monitoring
    }

    /// Validates the contract terms.
    ///
    /// # Errors
    ///
    /// - `strike` negative or non-finite
    /// - `barrier` non-positive or non-finite
    /// - `barrier` at or below the strike for an up-barrier call
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.strike < T::zero() || !self.strike.is_finite() {
            return Err(PricingError::invalid(
                "strike",
                "must be non-negative and finite",
            ));
        }
        if self.barrier <= T::zero() || !self.barrier.is_finite() {
            return Err(PricingError::invalid("barrier", "must be positive and finite"));
        }
        if self.barrier_type.direction == BarrierDirection::Up
            && self.barrier_type.option_type == OptionType::Call
            && self.strike >= self.barrier
        {
            return Err(PricingError::invalid(
                "barrier",
                "up-barrier call requires strike below barrier",
            ));
        }
        Ok(())
    }

    /// Returns true if the spot starts through the contract barrier or a
    /// simulated price touches the effective barrier.
    #[inline]
    pub fn is_knocked(&self, observer: &PathObserver<T>) -> bool {
        let simulated = match self.barrier_type.direction {
            BarrierDirection::Up => observer.simulated_maximum(),
            BarrierDirection::Down => observer.simulated_minimum(),
        };
        self.barrier_type.is_breached(observer.initial(), self.barrier)
            || self.barrier_type.is_breached(simulated, self.effective_barrier)
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for BarrierPayoff<T> {
    #[inline]
    fn payoff(&self, observer: &PathObserver<T>) -> T {
        let knocked = self.is_knocked(observer);
        let alive = match self.barrier_type.knock {
            KnockType::Out => !knocked,
            KnockType::In => knocked,
        };
        if alive {
            vanilla_intrinsic(self.barrier_type.option_type, observer.terminal(), self.strike)
        } else {
            T::zero()
        }
    }

    /// Moves the barrier towards the spot: down for up barriers, up for
    /// down barriers.
    fn on_grid(&self, vol_sqrt_dt: T) -> Self {
        let shift = self.monitoring.shift_factor(vol_sqrt_dt);
        let effective_barrier = match self.barrier_type.direction {
            BarrierDirection::Up => self.barrier / shift,
            BarrierDirection::Down => self.barrier * shift,
        };
        Self {
            effective_barrier,
            ..*self
        }
    }
}
