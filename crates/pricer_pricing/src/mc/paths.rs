//! Path generation for Monte Carlo simulation.
//!
//! This module implements Geometric Brownian Motion (GBM) path generation
//! with the exact log-space step
//!
//! ```text
//! S(t+dt) = S(t) × exp((r - σ²/2)dt + σ√dt × Z)
//! ```
//!
//! # Memory Layout
//!
//! Stored paths are row-major: `paths[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial spot price.

use pricer_core::types::{MarketParameters, PricingError};

use crate::rng::PricerRng;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// Under the risk-neutral measure the asset follows
/// ```text
/// dS = r S dt + σ S dW
/// ```
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.04, 0.2, 1.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r) - annualised.
    pub rate: f64,
    /// Volatility (σ) - annualised.
    pub volatility: f64,
    /// Time to maturity (T) - in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }

    /// Extracts the dynamics from a market parameter set.
    #[inline]
    pub fn from_market(market: &MarketParameters) -> Self {
        Self::new(market.spot, market.rate, market.volatility, market.maturity)
    }

    /// Risk-free discount factor `exp(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` for a non-positive spot, volatility
    /// or maturity, or a non-finite rate.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(PricingError::invalid("spot", "must be positive and finite"));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid("rate", "must be finite"));
        }
        if !self.volatility.is_finite() || self.volatility <= 0.0 {
            return Err(PricingError::invalid(
                "volatility",
                "must be positive and finite",
            ));
        }
        if !self.maturity.is_finite() || self.maturity <= 0.0 {
            return Err(PricingError::invalid(
                "maturity",
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.04,
            volatility: 0.2,
            maturity: 1.0,
        }
    }
}

/// Precomputed exact GBM step on a uniform grid.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{GbmParams, GbmStepper};
///
/// let stepper = GbmStepper::new(GbmParams::new(100.0, 0.0, 0.2, 1.0), 4);
/// assert_eq!(stepper.dt(), 0.25);
/// // Zero shock leaves only the Itô drift
/// let next = stepper.step(100.0, 0.0);
/// assert!((next - 100.0 * (-0.005_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStepper {
    spot: f64,
    dt: f64,
    drift_dt: f64,
    vol_sqrt_dt: f64,
    n_steps: usize,
}

impl GbmStepper {
    /// Creates a stepper for `n_steps` equal steps over the maturity.
    #[inline]
    pub fn new(params: GbmParams, n_steps: usize) -> Self {
        let dt = params.maturity / n_steps as f64;
        Self {
            spot: params.spot,
            dt,
            drift_dt: (params.rate - 0.5 * params.volatility * params.volatility) * dt,
            vol_sqrt_dt: params.volatility * dt.sqrt(),
            n_steps,
        }
    }

    /// Time step `T / N`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Initial spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Advances `s` by one step with standard normal shock `z`.
    #[inline]
    pub fn step(&self, s: f64, z: f64) -> f64 {
        s * (self.drift_dt + self.vol_sqrt_dt * z).exp()
    }

    /// Writes one path `S_0..S_N` into `path` (length `n_steps + 1`).
    ///
    /// `normals` is scratch space of length `n_steps`.
    pub fn fill_path(&self, rng: &mut PricerRng, normals: &mut [f64], path: &mut [f64]) {
        debug_assert_eq!(normals.len(), self.n_steps);
        debug_assert_eq!(path.len(), self.n_steps + 1);

        rng.fill_normal(normals);
        path[0] = self.spot;
        for (step, &z) in normals.iter().enumerate() {
            path[step + 1] = self.step(path[step], z);
        }
    }
}

/// Generates `n_paths` GBM paths into a row-major buffer.
///
/// Returns `n_paths * (n_steps + 1)` prices.
pub fn generate_gbm_paths(stepper: &GbmStepper, rng: &mut PricerRng, n_paths: usize) -> Vec<f64> {
    let row = stepper.n_steps() + 1;
    let mut paths = vec![0.0; n_paths * row];
    let mut normals = vec![0.0; stepper.n_steps()];

    for path in paths.chunks_exact_mut(row) {
        stepper.fill_path(rng, &mut normals, path);
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gbm_params_validate() {
        assert!(GbmParams::default().validate().is_ok());
        let err = GbmParams::new(0.0, 0.04, 0.2, 1.0).validate().unwrap_err();
        assert_eq!(err.parameter(), Some("spot"));
        let err = GbmParams::new(100.0, 0.04, 0.0, 1.0).validate().unwrap_err();
        assert_eq!(err.parameter(), Some("volatility"));
        let err = GbmParams::new(100.0, f64::NAN, 0.2, 1.0).validate().unwrap_err();
        assert_eq!(err.parameter(), Some("rate"));
        let err = GbmParams::new(100.0, 0.04, 0.2, -1.0).validate().unwrap_err();
        assert_eq!(err.parameter(), Some("maturity"));
    }

    #[test]
    fn test_from_market() {
        let market = MarketParameters::new(95.0, 100.0, 2.0, 0.03, 0.25);
        let gbm = GbmParams::from_market(&market);
        assert_eq!(gbm, GbmParams::new(95.0, 0.03, 0.25, 2.0));
        assert_relative_eq!(gbm.discount_factor(), (-0.06_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_paths_layout_and_positivity() {
        let stepper = GbmStepper::new(GbmParams::default(), 50);
        let mut rng = PricerRng::from_seed(42);
        let paths = generate_gbm_paths(&stepper, &mut rng, 100);

        assert_eq!(paths.len(), 100 * 51);
        for path in paths.chunks_exact(51) {
            assert_eq!(path[0], 100.0);
            assert!(path.iter().all(|&s| s > 0.0 && s.is_finite()));
        }
    }

    #[test]
    fn test_terminal_mean_is_forward() {
        // E[S_T] = S0 e^{rT}; one step is exact
        let params = GbmParams::new(100.0, 0.05, 0.2, 1.0);
        let stepper = GbmStepper::new(params, 1);
        let mut rng = PricerRng::from_seed(7);
        let n = 200_000;
        let paths = generate_gbm_paths(&stepper, &mut rng, n);
        let mean = paths.chunks_exact(2).map(|p| p[1]).sum::<f64>() / n as f64;
        // Standard error of the mean ≈ 21 / sqrt(200_000) ≈ 0.047
        assert_relative_eq!(mean, 100.0 * 0.05_f64.exp(), epsilon = 0.25);
    }

    #[test]
    fn test_same_seed_same_paths() {
        let stepper = GbmStepper::new(GbmParams::default(), 10);
        let a = generate_gbm_paths(&stepper, &mut PricerRng::from_seed(3), 20);
        let b = generate_gbm_paths(&stepper, &mut PricerRng::from_seed(3), 20);
        assert_eq!(a, b);
    }
}
