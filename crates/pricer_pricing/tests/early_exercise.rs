//! Early-exercise tests: Longstaff-Schwartz against the binomial lattice,
//! and structural properties of the lattice.

use approx::assert_relative_eq;
use pricer_core::types::{DividendSchedule, ExerciseStyle, MarketParameters, OptionType};
use pricer_pricing::lattice::price_binomial;
use pricer_pricing::mc::{price_monte_carlo, McPayoff, MonteCarloConfig};
use proptest::prelude::*;

fn reference_market() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2)
}

fn config(n_paths: usize, n_steps: usize, seed: u64) -> MonteCarloConfig {
    MonteCarloConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .seed(seed)
        .build()
        .unwrap()
}

// ============================================================================
// Longstaff-Schwartz
// ============================================================================

#[test]
fn test_lsm_american_put_close_to_lattice() {
    let market = reference_market();
    let tree = price_binomial(&market, 2_000, OptionType::Put, ExerciseStyle::American).unwrap();
    let lsm = price_monte_carlo(&market, &config(50_000, 50, 7), McPayoff::American(OptionType::Put))
        .unwrap();

    assert_relative_eq!(tree, 6.4037, epsilon = 0.005);
    assert!(
        (lsm.price - tree).abs() < 0.25,
        "LSM={:.4} ± {:.4}, lattice={:.4}",
        lsm.price,
        lsm.std_error,
        tree
    );
}

#[test]
fn test_lsm_put_carries_early_exercise_premium() {
    let market = reference_market();
    let cfg = config(50_000, 50, 13);
    let american = price_monte_carlo(&market, &cfg, McPayoff::American(OptionType::Put)).unwrap();
    let european = price_monte_carlo(&market, &cfg, McPayoff::European(OptionType::Put)).unwrap();

    // Lattice premium is about 0.40
    assert!(american.price > european.price + 0.2);
}

#[test]
fn test_lsm_reproducible_per_seed() {
    let market = reference_market();
    let payoff = McPayoff::American(OptionType::Put);

    let first = price_monte_carlo(&market, &config(5_000, 20, 99), payoff).unwrap();
    let second = price_monte_carlo(&market, &config(5_000, 20, 99), payoff).unwrap();
    let other = price_monte_carlo(&market, &config(5_000, 20, 100), payoff).unwrap();

    assert_eq!(first, second);
    assert_ne!(first.price, other.price);
}

#[test]
fn test_lsm_rejects_dividends() {
    let market =
        reference_market().with_dividends(DividendSchedule::from_pairs(&[(0.5, 0.3)]));
    let result = price_monte_carlo(&market, &config(1_000, 10, 1), McPayoff::American(OptionType::Call));
    assert!(result.is_err());
}

// ============================================================================
// Lattice
// ============================================================================

#[test]
fn test_american_call_without_dividends_equals_european() {
    let market = reference_market();
    let american = price_binomial(&market, 500, OptionType::Call, ExerciseStyle::American).unwrap();
    let european = price_binomial(&market, 500, OptionType::Call, ExerciseStyle::European).unwrap();
    assert_relative_eq!(american, european, epsilon = 1e-12);
}

#[test]
fn test_large_dividend_makes_early_exercise_optimal() {
    let market =
        reference_market().with_dividends(DividendSchedule::from_pairs(&[(0.5, 0.3)]));
    let american = price_binomial(&market, 500, OptionType::Call, ExerciseStyle::American).unwrap();
    let european = price_binomial(&market, 500, OptionType::Call, ExerciseStyle::European).unwrap();

    assert_relative_eq!(american, 6.6209, epsilon = 0.002);
    assert_relative_eq!(european, 0.3932, epsilon = 0.002);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_american_dominates_european(
        spot in 60.0f64..140.0,
        strike in 60.0f64..140.0,
        vol in 0.1f64..0.5,
        rate in 0.0f64..0.08,
        maturity in 0.25f64..2.0,
        is_call in any::<bool>(),
    ) {
        let market = MarketParameters::new(spot, strike, maturity, rate, vol);
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };

        let american = price_binomial(&market, 200, option_type, ExerciseStyle::American).unwrap();
        let european = price_binomial(&market, 200, option_type, ExerciseStyle::European).unwrap();

        prop_assert!(american >= european - 1e-10);
        prop_assert!(american >= option_type.intrinsic(spot, strike) - 1e-10);
    }

    #[test]
    fn prop_lattice_put_call_parity(
        spot in 60.0f64..140.0,
        strike in 60.0f64..140.0,
        vol in 0.1f64..0.5,
        rate in 0.0f64..0.08,
        maturity in 0.25f64..2.0,
    ) {
        let market = MarketParameters::new(spot, strike, maturity, rate, vol);
        let call = price_binomial(&market, 200, OptionType::Call, ExerciseStyle::European).unwrap();
        let put = price_binomial(&market, 200, OptionType::Put, ExerciseStyle::European).unwrap();

        let forward_value = spot - strike * (-rate * maturity).exp();
        prop_assert!((call - put - forward_value).abs() < 1e-8);
    }
}
