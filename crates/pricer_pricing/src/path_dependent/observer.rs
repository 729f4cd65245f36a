//! PathObserver: streaming statistics accumulation for path-dependent options.
//!
//! Statistics are accumulated incrementally as prices are observed, so a
//! path never needs to be stored to price a barrier, lookback or Asian
//! payoff.
//!
//! # Streaming Statistics
//!
//! - **Arithmetic average**: running sum / count over `S_1..S_N`
//! - **Geometric average**: exp(running log sum / count) over `S_1..S_N`
//! - **Maximum / minimum**: running extremes over `S_0..S_N`, with the
//!   extremes of the simulated dates `S_1..S_N` also kept on their own
//! - **Terminal**: the last observed price

use num_traits::Float;

/// Streaming path observation statistics.
///
/// The initial spot seeds the running extremes but is not part of the
/// averages: averaging dates are the simulation dates `t_1..t_N`. The
/// simulated extremes exclude the spot, since the spot is known exactly and
/// never needs a continuity correction.
///
/// # Example
///
/// ```
/// use pricer_pricing::path_dependent::PathObserver;
///
/// let mut observer: PathObserver<f64> = PathObserver::new();
/// observer.start(100.0);
/// observer.observe(105.0);
/// observer.observe(110.0);
/// observer.observe(95.0);
///
/// assert_eq!(observer.count(), 3);
/// assert_eq!(observer.terminal(), 95.0);
/// assert_eq!(observer.maximum(), 110.0);
/// assert_eq!(observer.minimum(), 95.0);
/// assert!((observer.arithmetic_average() - 310.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct PathObserver<T: Float> {
    /// Running sum for arithmetic average: Σ S_i
    running_sum: T,
    /// Running log sum for geometric average: Σ ln(S_i)
    running_log_sum: T,
    /// Initial spot `S_0`
    initial: T,
    /// Running maximum over `S_1..S_N`
    simulated_max: T,
    /// Running minimum over `S_1..S_N`
    simulated_min: T,
    /// Number of averaging observations
    count: usize,
    /// Most recent price
    terminal: T,
}

impl<T: Float> Default for PathObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> PathObserver<T> {
    /// Creates a new empty path observer.
    #[inline]
    pub fn new() -> Self {
        Self {
            running_sum: T::zero(),
            running_log_sum: T::zero(),
            initial: T::nan(),
            simulated_max: T::neg_infinity(),
            simulated_min: T::infinity(),
            count: 0,
            terminal: T::zero(),
        }
    }

    /// Resets the statistics and records the initial spot.
    ///
    /// Call this before each new path.
    #[inline]
    pub fn start(&mut self, spot: T) {
        self.running_sum = T::zero();
        self.running_log_sum = T::zero();
        self.initial = spot;
        self.simulated_max = T::neg_infinity();
        self.simulated_min = T::infinity();
        self.count = 0;
        self.terminal = spot;
    }

    /// Observes the next simulated price and updates running statistics.
    #[inline]
    pub fn observe(&mut self, price: T) {
        self.running_sum = self.running_sum + price;
        self.running_log_sum = self.running_log_sum + price.ln();
        self.simulated_max = self.simulated_max.max(price);
        self.simulated_min = self.simulated_min.min(price);
        self.count += 1;
        self.terminal = price;
    }

    /// Builds an observer from a stored path `S_0..S_N`.
    pub fn from_path(path: &[T]) -> Self {
        let mut observer = Self::new();
        if let Some((&spot, rest)) = path.split_first() {
            observer.start(spot);
            for &price in rest {
                observer.observe(price);
            }
        }
        observer
    }

    /// Returns the arithmetic average of observed prices.
    ///
    /// `Σ S_i / n` if `n > 0`, otherwise the terminal price.
    #[inline]
    pub fn arithmetic_average(&self) -> T {
        if self.count == 0 {
            self.terminal
        } else {
            self.running_sum / T::from(self.count).unwrap()
        }
    }

    /// Returns the geometric average `exp(Σ ln(S_i) / n)`.
    ///
    /// Falls back to the terminal price if nothing was observed.
    #[inline]
    pub fn geometric_average(&self) -> T {
        if self.count == 0 {
            self.terminal
        } else {
            (self.running_log_sum / T::from(self.count).unwrap()).exp()
        }
    }

    /// Returns the initial spot, or NaN before [`start`](Self::start).
    #[inline]
    pub fn initial(&self) -> T {
        self.initial
    }

    /// Returns the maximum price, including the initial spot.
    #[inline]
    pub fn maximum(&self) -> T {
        // NaN initial is ignored by `max`
        self.simulated_max.max(self.initial)
    }

    /// Returns the minimum price, including the initial spot.
    #[inline]
    pub fn minimum(&self) -> T {
        self.simulated_min.min(self.initial)
    }

    /// Returns the maximum over the simulated dates `S_1..S_N`.
    ///
    /// Negative infinity if nothing was observed.
    #[inline]
    pub fn simulated_maximum(&self) -> T {
        self.simulated_max
    }

    /// Returns the minimum over the simulated dates `S_1..S_N`.
    ///
    /// Positive infinity if nothing was observed.
    #[inline]
    pub fn simulated_minimum(&self) -> T {
        self.simulated_min
    }

    /// Returns the most recent price.
    #[inline]
    pub fn terminal(&self) -> T {
        self.terminal
    }

    /// Returns the number of averaging observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_is_empty() {
        let observer: PathObserver<f64> = PathObserver::new();
        assert_eq!(observer.count(), 0);
        assert_eq!(observer.maximum(), f64::NEG_INFINITY);
        assert_eq!(observer.minimum(), f64::INFINITY);
        assert!(observer.initial().is_nan());
    }

    #[test]
    fn test_spot_seeds_extremes_but_not_average() {
        let mut observer = PathObserver::new();
        observer.start(100.0);
        observer.observe(90.0);
        observer.observe(95.0);

        assert_eq!(observer.maximum(), 100.0);
        assert_eq!(observer.minimum(), 90.0);
        assert_eq!(observer.initial(), 100.0);
        assert_relative_eq!(observer.arithmetic_average(), 92.5, epsilon = 1e-12);
        assert_eq!(observer.terminal(), 95.0);
    }

    #[test]
    fn test_geometric_not_above_arithmetic() {
        let observer = PathObserver::from_path(&[100.0, 80.0, 120.0, 101.0, 99.0]);
        assert_eq!(observer.count(), 4);
        assert!(observer.geometric_average() <= observer.arithmetic_average());
        let expected = (80.0_f64 * 120.0 * 101.0 * 99.0).powf(0.25);
        assert_relative_eq!(observer.geometric_average(), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_start_resets_previous_path() {
        let mut observer = PathObserver::from_path(&[100.0, 150.0, 40.0]);
        observer.start(100.0);
        observer.observe(101.0);
        assert_eq!(observer.count(), 1);
        assert_eq!(observer.maximum(), 101.0);
        assert_eq!(observer.minimum(), 100.0);
        assert_eq!(observer.simulated_minimum(), 101.0);
    }

    #[test]
    fn test_simulated_extremes_exclude_spot() {
        let observer = PathObserver::from_path(&[100.0, 101.0, 103.0, 102.0]);
        assert_eq!(observer.maximum(), 103.0);
        assert_eq!(observer.minimum(), 100.0);
        assert_eq!(observer.simulated_maximum(), 103.0);
        assert_eq!(observer.simulated_minimum(), 101.0);
    }

    #[test]
    fn test_spot_only_path() {
        let observer = PathObserver::from_path(&[100.0_f64]);
        assert_eq!(observer.count(), 0);
        assert_eq!(observer.terminal(), 100.0);
        assert_eq!(observer.arithmetic_average(), 100.0);
        assert_eq!(observer.geometric_average(), 100.0);
        assert_eq!(observer.maximum(), 100.0);
        assert_eq!(observer.minimum(), 100.0);
        assert_eq!(observer.simulated_maximum(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_f32_compatibility() {
        let observer = PathObserver::from_path(&[1.0_f32, 2.0, 4.0]);
        assert!((observer.geometric_average() - 8.0_f32.sqrt()).abs() < 1e-5);
    }
}
