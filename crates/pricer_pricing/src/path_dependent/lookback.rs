//! Floating-strike lookback payoff.
//!
//! - **Call**: `S_T - min S`
//! - **Put**: `max S - S_T`
//!
//! The extremes include the initial spot, so both payoffs are non-negative.

use num_traits::Float;
use pricer_core::types::OptionType;

use super::{Monitoring, PathDependentPayoff, PathObserver};

/// Floating-strike lookback payoff.
///
/// Under continuity correction the simulated minimum is scaled down (call)
/// and the simulated maximum up (put) by `exp(β σ √dt)`. The initial spot
/// is exact and enters the extreme unshifted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookbackPayoff<T: Float> {
    option_type: OptionType,
    monitoring: Monitoring,
    /// Multiplicative shift applied to the simulated extreme.
    extreme_shift: T,
}

impl<T: Float> LookbackPayoff<T> {
    /// Creates a floating-strike lookback payoff.
    #[inline]
    pub fn new(option_type: OptionType, monitoring: Monitoring) -> Self {
        Self {
            option_type,
            monitoring,
            extreme_shift: T::one(),
        }
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Monitoring mode.
    #[inline]
    pub fn monitoring(&self) -> Monitoring {
        self.monitoring
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for LookbackPayoff<T> {
    #[inline]
    fn payoff(&self, observer: &PathObserver<T>) -> T {
        let value = match self.option_type {
            OptionType::Call => {
                let minimum =
                    (observer.simulated_minimum() / self.extreme_shift).min(observer.initial());
                observer.terminal() - minimum
            }
            OptionType::Put => {
                let maximum =
                    (observer.simulated_maximum() * self.extreme_shift).max(observer.initial());
                maximum - observer.terminal()
            }
        };
        value.max(T::zero())
    }

    fn on_grid(&self, vol_sqrt_dt: T) -> Self {
        Self {
            extreme_shift: self.monitoring.shift_factor(vol_sqrt_dt),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discrete_payoffs() {
        let obs = PathObserver::from_path(&[100.0, 90.0, 120.0, 105.0]);
        let call = LookbackPayoff::new(OptionType::Call, Monitoring::Discrete);
        let put = LookbackPayoff::new(OptionType::Put, Monitoring::Discrete);
        assert_eq!(call.payoff(&obs), 15.0);
        assert_eq!(put.payoff(&obs), 15.0);
    }

    #[test]
    fn test_spot_is_an_extreme() {
        // Monotone up path: minimum is the initial spot
        let obs = PathObserver::from_path(&[100.0, 101.0, 102.0]);
        let call = LookbackPayoff::new(OptionType::Call, Monitoring::Discrete);
        let put = LookbackPayoff::new(OptionType::Put, Monitoring::Discrete);
        assert_eq!(call.payoff(&obs), 2.0);
        assert_eq!(put.payoff(&obs), 0.0);
    }

    #[test]
    fn test_correction_widens_extremes() {
        let obs = PathObserver::from_path(&[100.0, 90.0, 120.0, 105.0]);
        let v = 0.0126;
        let shift = (0.5826_f64 * v).exp();

        let call = LookbackPayoff::new(OptionType::Call, Monitoring::ContinuityCorrected).on_grid(v);
        let put = LookbackPayoff::new(OptionType::Put, Monitoring::ContinuityCorrected).on_grid(v);
        assert_relative_eq!(call.payoff(&obs), 105.0 - 90.0 / shift, epsilon = 1e-12);
        assert_relative_eq!(put.payoff(&obs), 120.0 * shift - 105.0, epsilon = 1e-12);
        assert!(call.payoff(&obs) > 15.0);
    }

    #[test]
    fn test_correction_leaves_spot_extreme_unshifted() {
        let v = 0.0126;
        let shift = (0.5826_f64 * v).exp();
        let call = LookbackPayoff::new(OptionType::Call, Monitoring::ContinuityCorrected).on_grid(v);
        let put = LookbackPayoff::new(OptionType::Put, Monitoring::ContinuityCorrected).on_grid(v);

        // Monotone up path: the minimum is the spot and stays exact
        let rising = PathObserver::from_path(&[100.0, 101.0, 102.0]);
        assert_relative_eq!(call.payoff(&rising), 2.0, epsilon = 1e-12);
        assert_relative_eq!(put.payoff(&rising), 102.0 * shift - 102.0, epsilon = 1e-12);

        // Simulated minimum just above the spot: shifted value undercuts it
        let near = PathObserver::from_path(&[100.0, 100.5, 104.0]);
        assert_relative_eq!(call.payoff(&near), 104.0 - 100.5 / shift, epsilon = 1e-12);

        let flat = PathObserver::from_path(&[100.0_f64]);
        assert_eq!(call.payoff(&flat), 0.0);
        assert_eq!(put.payoff(&flat), 0.0);
    }
}
