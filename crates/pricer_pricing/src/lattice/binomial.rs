//! Cox-Ross-Rubinstein binomial tree.
//!
//! `u = e^{σ√dt}`, `d = 1/u`, `p = (e^{r dt} - d)/(u - d)` and backward
//! induction `V = e^{-r dt}(p V_up + (1 - p) V_down)`, with the exercise
//! value taken at every node for American style.
//!
//! # Proportional dividends
//!
//! A dividend `(t, δ)` is paid at step `k = clamp(round(t/dt), 1, N)`. Node
//! prices from step `k` on carry the factor `1 - δ`, so the tree still
//! recombines and exercise at a dividend step sees the ex-dividend price.

use pricer_core::types::{ExerciseStyle, MarketParameters, OptionType, PricingError};
use tracing::debug;

/// Largest supported number of time steps.
pub const MAX_TREE_STEPS: usize = 100_000;

/// Largest `|ln S0| + σ√(T N)`, the log-magnitude of the extreme nodes.
///
/// Keeps `S0 e^{±σ√(TN)}` inside the normal `f64` range.
const MAX_LOG_SPREAD: f64 = 700.0;

/// CRR binomial lattice with a fixed number of steps.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{ExerciseStyle, MarketParameters, OptionType};
/// use pricer_pricing::lattice::BinomialTree;
///
/// let tree = BinomialTree::new(500).unwrap();
/// let market = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2);
///
/// let european = tree.price(&market, OptionType::Put, ExerciseStyle::European).unwrap();
/// let american = tree.price(&market, OptionType::Put, ExerciseStyle::American).unwrap();
/// assert!(american > european);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinomialTree {
    n_steps: usize,
}

impl BinomialTree {
    /// Creates a tree with `n_steps` time steps.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` unless `1 <= n_steps <= 100_000`.
    pub fn new(n_steps: usize) -> Result<Self, PricingError> {
        if n_steps == 0 || n_steps > MAX_TREE_STEPS {
            return Err(PricingError::invalid(
                "n_steps",
                format!("must be in [1, {}], got {}", MAX_TREE_STEPS, n_steps),
            ));
        }
        Ok(Self { n_steps })
    }

    /// Number of time steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Risk-neutral up probability for this step count.
    ///
    /// # Errors
    ///
    /// `InconsistentModel` if `p` is not finite or not strictly inside
    /// `(0, 1)`, which happens when `|r| dt` is large relative to `σ√dt`.
    pub fn risk_neutral_probability(
        &self,
        rate: f64,
        volatility: f64,
        maturity: f64,
    ) -> Result<f64, PricingError> {
        let dt = maturity / self.n_steps as f64;
        let u = (volatility * dt.sqrt()).exp();
        let d = 1.0 / u;
        let p = ((rate * dt).exp() - d) / (u - d);
        if !p.is_finite() || p <= 0.0 || p >= 1.0 {
            return Err(PricingError::InconsistentModel {
                probability: p,
                message: format!(
                    "risk-neutral probability outside (0, 1) for r = {}, sigma = {}, dt = {}",
                    rate, volatility, dt
                ),
            });
        }
        Ok(p)
    }

    /// Cumulative dividend retention at each step `0..=N`.
    fn retention_by_step(&self, market: &MarketParameters, dt: f64) -> Vec<f64> {
        let n = self.n_steps;
        let mut retention = vec![1.0; n + 1];
        for dividend in market.dividends.entries() {
            let step = ((dividend.time / dt).round() as usize).clamp(1, n);
            for factor in retention[step..].iter_mut() {
                *factor *= 1.0 - dividend.proportion;
            }
        }
        retention
    }

    /// Prices a vanilla call or put.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for invalid market data, or a lattice too wide
    ///   for floating point
    /// - `InconsistentModel` if the up probability leaves `(0, 1)`
    pub fn price(
        &self,
        market: &MarketParameters,
        option_type: OptionType,
        exercise: ExerciseStyle,
    ) -> Result<f64, PricingError> {
        market.validate()?;
        let n = self.n_steps;
        let volatility = market.volatility;
        let spread = volatility * (market.maturity * n as f64).sqrt();
        if market.spot.ln().abs() + spread > MAX_LOG_SPREAD {
            return Err(PricingError::invalid(
                "n_steps",
                "lattice spread exceeds the floating-point range",
            ));
        }

        let p = self.risk_neutral_probability(market.rate, volatility, market.maturity)?;
        let dt = market.maturity / n as f64;
        let vol_sqrt_dt = volatility * dt.sqrt();
        let ratio = (2.0 * vol_sqrt_dt).exp();
        let disc = (-market.rate * dt).exp();
        let disc_p = disc * p;
        let disc_1mp = disc * (1.0 - p);
        let retention = self.retention_by_step(market, dt);
        let strike = market.strike;
        let american = exercise.allows_early_exercise();

        debug!(n_steps = n, p, american, "binomial lattice");

        // Lowest node of step i: S0 · retention_i · d^i
        let lowest = |i: usize| market.spot * retention[i] * (-(i as f64) * vol_sqrt_dt).exp();

        let mut values = Vec::with_capacity(n + 1);
        let mut st = lowest(n);
        for _ in 0..=n {
            values.push(option_type.intrinsic(st, strike));
            st *= ratio;
        }

        for i in (0..n).rev() {
            if american {
                let mut st = lowest(i);
                for j in 0..=i {
                    let continuation = disc_p * values[j + 1] + disc_1mp * values[j];
                    values[j] = continuation.max(option_type.intrinsic(st, strike));
                    st *= ratio;
                }
            } else {
                for j in 0..=i {
                    values[j] = disc_p * values[j + 1] + disc_1mp * values[j];
                }
            }
        }

        Ok(values[0])
    }
}
