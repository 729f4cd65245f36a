//! Market parameter sets.
//!
//! [`MarketParameters`] is the immutable input shared by every pricer. It is
//! a plain value type; pricers validate it on entry and never mutate it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// A proportional cash distribution paid at a known time.
///
/// At the dividend time the asset price drops by `proportion * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dividend {
    /// Ex-dividend time in years from today.
    pub time: f64,
    /// Fraction of the asset price paid out, in `[0, 1)`.
    pub proportion: f64,
}

impl Dividend {
    /// Creates a new dividend entry.
    #[inline]
    pub fn new(time: f64, proportion: f64) -> Self {
        Self { time, proportion }
    }
}

/// Ordered schedule of proportional dividends.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DividendSchedule {
    entries: Vec<Dividend>,
}

impl DividendSchedule {
    /// Creates an empty schedule.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from `(time, proportion)` pairs, sorted by time.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let mut entries: Vec<Dividend> = pairs
            .iter()
            .map(|&(time, proportion)| Dividend::new(time, proportion))
            .collect();
        entries.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { entries }
    }

    /// Adds a dividend, keeping the schedule sorted.
    pub fn push(&mut self, dividend: Dividend) {
        let idx = self
            .entries
            .partition_point(|d| d.time <= dividend.time);
        self.entries.insert(idx, dividend);
    }

    /// Returns the dividends in time order.
    #[inline]
    pub fn entries(&self) -> &[Dividend] {
        &self.entries
    }

    /// Returns true if no dividends are scheduled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Product of `(1 - proportion)` over every dividend paid by `maturity`.
    pub fn retention_factor(&self, maturity: f64) -> f64 {
        self.entries
            .iter()
            .filter(|d| d.time <= maturity)
            .map(|d| 1.0 - d.proportion)
            .product()
    }

    fn validate(&self, maturity: f64) -> Result<(), PricingError> {
        for d in &self.entries {
            if !d.time.is_finite() || d.time <= 0.0 || d.time > maturity {
                return Err(PricingError::invalid(
                    "dividend.time",
                    format!("must lie in (0, {}], got {}", maturity, d.time),
                ));
            }
            if !d.proportion.is_finite() || !(0.0..1.0).contains(&d.proportion) {
                return Err(PricingError::invalid(
                    "dividend.proportion",
                    format!("must lie in [0, 1), got {}", d.proportion),
                ));
            }
        }
        Ok(())
    }
}

/// Black-Scholes market and contract parameters.
///
/// # Examples
/// ```
/// use pricer_core::types::MarketParameters;
///
/// let params = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2).with_barrier(115.0);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.barrier, Some(115.0));
///
/// let bad = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.0);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarketParameters {
    /// Spot price S0.
    pub spot: f64,
    /// Strike price K.
    pub strike: f64,
    /// Time to maturity T in years.
    pub maturity: f64,
    /// Continuously compounded risk-free rate r.
    pub rate: f64,
    /// Annualised volatility sigma.
    pub volatility: f64,
    /// Barrier level B for barrier instruments.
    #[cfg_attr(feature = "serde", serde(default))]
    pub barrier: Option<f64>,
    /// Proportional dividends (used by the lattice).
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividends: DividendSchedule,
}

impl MarketParameters {
    /// Creates a parameter set without barrier or dividends.
    pub fn new(spot: f64, strike: f64, maturity: f64, rate: f64, volatility: f64) -> Self {
        Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            barrier: None,
            dividends: DividendSchedule::new(),
        }
    }

    /// Returns a copy with the barrier level set.
    pub fn with_barrier(mut self, barrier: f64) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// Returns a copy with the dividend schedule set.
    pub fn with_dividends(mut self, dividends: DividendSchedule) -> Self {
        self.dividends = dividends;
        self
    }

    /// Returns a copy with a different spot.
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    /// Returns a copy with a different volatility.
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Returns a copy with a different maturity.
    pub fn with_maturity(mut self, maturity: f64) -> Self {
        self.maturity = maturity;
        self
    }

    /// Risk-free discount factor `exp(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Checks every invariant of the parameter set.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the first offending field:
    /// non-finite values, `spot <= 0`, `maturity <= 0`, `volatility <= 0`,
    /// `strike < 0`, `barrier <= 0`, or a malformed dividend.
    pub fn validate(&self) -> Result<(), PricingError> {
        positive("spot", self.spot)?;
        positive("maturity", self.maturity)?;
        positive("volatility", self.volatility)?;

        if !self.strike.is_finite() || self.strike < 0.0 {
            return Err(PricingError::invalid(
                "strike",
                format!("must be non-negative and finite, got {}", self.strike),
            ));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid(
                "rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        if let Some(barrier) = self.barrier {
            positive("barrier", barrier)?;
        }
        self.dividends.validate(self.maturity)
    }

    /// Returns the barrier, or an error if none was supplied.
    pub fn require_barrier(&self) -> Result<f64, PricingError> {
        self.barrier
            .ok_or_else(|| PricingError::invalid("barrier", "barrier level is required"))
    }

    /// Validates and additionally enforces `K < B` for up-barrier calls.
    pub fn validate_up_barrier(&self) -> Result<f64, PricingError> {
        self.validate()?;
        let barrier = self.require_barrier()?;
        if self.strike >= barrier {
            return Err(PricingError::invalid(
                "barrier",
                format!(
                    "up-barrier call requires strike < barrier, got K = {} and B = {}",
                    self.strike, barrier
                ),
            ));
        }
        Ok(barrier)
    }
}

#[inline]
fn positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2)
    }

    #[test]
    fn test_valid_parameters() {
        assert!(base().validate().is_ok());
        assert!(base().with_barrier(115.0).validate().is_ok());
        // Zero strike and negative rates are allowed
        let mut p = base();
        p.strike = 0.0;
        p.rate = -0.01;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_invalid_fields_are_named() {
        let cases = [
            (base().with_spot(0.0), "spot"),
            (base().with_volatility(-0.2), "volatility"),
            (base().with_maturity(0.0), "maturity"),
            (base().with_spot(f64::NAN), "spot"),
            (base().with_barrier(-1.0), "barrier"),
        ];
        for (params, name) in cases {
            let err = params.validate().unwrap_err();
            assert_eq!(err.parameter(), Some(name), "{:?}", err);
        }

        let mut p = base();
        p.strike = -1.0;
        assert_eq!(p.validate().unwrap_err().parameter(), Some("strike"));
    }

    #[test]
    fn test_up_barrier_requires_strike_below_barrier() {
        assert_relative_eq!(
            base().with_barrier(115.0).validate_up_barrier().unwrap(),
            115.0
        );
        let err = base().with_barrier(95.0).validate_up_barrier().unwrap_err();
        assert_eq!(err.parameter(), Some("barrier"));
        assert!(base().validate_up_barrier().is_err());
    }

    #[test]
    fn test_dividend_schedule_sorted_and_validated() {
        let mut schedule = DividendSchedule::from_pairs(&[(0.75, 0.02), (0.25, 0.01)]);
        schedule.push(Dividend::new(0.5, 0.03));
        let times: Vec<f64> = schedule.entries().iter().map(|d| d.time).collect();
        assert_eq!(times, vec![0.25, 0.5, 0.75]);
        assert_relative_eq!(
            schedule.retention_factor(1.0),
            0.99 * 0.97 * 0.98,
            epsilon = 1e-15
        );
        assert_relative_eq!(schedule.retention_factor(0.3), 0.99, epsilon = 1e-15);

        assert!(base().with_dividends(schedule).validate().is_ok());

        let late = DividendSchedule::from_pairs(&[(1.5, 0.02)]);
        assert_eq!(
            base().with_dividends(late).validate().unwrap_err().parameter(),
            Some("dividend.time")
        );
        let whole = DividendSchedule::from_pairs(&[(0.5, 1.0)]);
        assert_eq!(
            base().with_dividends(whole).validate().unwrap_err().parameter(),
            Some("dividend.proportion")
        );
    }

    #[test]
    fn test_discount_factor() {
        assert_relative_eq!(base().discount_factor(), (-0.04_f64).exp(), epsilon = 1e-15);
    }
}
