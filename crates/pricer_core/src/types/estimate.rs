//! Price estimates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A price with its sampling uncertainty.
///
/// Closed-form and lattice prices are exact (`std_error == 0`); simulation
/// prices carry the standard error of the sample mean.
///
/// # Examples
/// ```
/// use pricer_core::types::PriceEstimate;
///
/// let mc = PriceEstimate::new(10.5, 0.05);
/// assert!((mc.confidence_95() - 0.098).abs() < 1e-12);
/// assert!(PriceEstimate::exact(9.925).is_exact());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceEstimate {
    /// Present value.
    pub price: f64,
    /// Standard error of the estimate (0 for deterministic methods).
    pub std_error: f64,
}

impl PriceEstimate {
    /// Creates an estimate from a mean and a standard error.
    #[inline]
    pub fn new(price: f64, std_error: f64) -> Self {
        Self { price, std_error }
    }

    /// Creates an estimate with no sampling error.
    #[inline]
    pub fn exact(price: f64) -> Self {
        Self {
            price,
            std_error: 0.0,
        }
    }

    /// Builds an estimate from per-path discounted payoffs.
    ///
    /// Uses the unbiased sample variance. A single sample has zero error.
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self::default();
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        if n == 1 {
            return Self::exact(mean);
        }
        let variance =
            samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        Self::new(mean, (variance / n as f64).sqrt())
    }

    /// Returns true for deterministic estimates.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.std_error == 0.0
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }

    /// Returns true if `value` lies within `k` standard errors of the price.
    #[inline]
    pub fn contains(&self, value: f64, k: f64) -> bool {
        (self.price - value).abs() <= k * self.std_error
    }
}
