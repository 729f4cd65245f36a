//! Check command implementation
//!
//! Prints the resolved configuration and cross-checks the three engines on
//! the reference contract (S0 = K = 100, T = 1, r = 4%, σ = 20%).

use pricer_core::types::{ExerciseStyle, MarketParameters, OptionType};
use pricer_models::analytical::{price_closed_form, ClosedFormInstrument};
use pricer_pricing::lattice::price_binomial;
use pricer_pricing::mc::{price_monte_carlo, McPayoff, MonteCarloConfig};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::{CliError, Result};

const PARITY_TOLERANCE: f64 = 1e-9;
const LATTICE_STEPS: usize = 2_000;
const LATTICE_TOLERANCE: f64 = 0.01;
const MC_PATHS: usize = 50_000;
const MC_SEED: u64 = 42;
const MC_STD_ERRORS: f64 = 4.0;

/// Outcome of one comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// Short name
    pub name: &'static str,
    /// Whether the comparison held
    pub passed: bool,
    /// Compared values
    pub detail: String,
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    println!("Resolved configuration:\n");
    println!("{}", toml::to_string_pretty(config)?);

    let outcomes = self_check()?;
    for outcome in &outcomes {
        let status = if outcome.passed { "ok" } else { "FAILED" };
        println!("[{:>6}] {}: {}", status, outcome.name, outcome.detail);
    }

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|outcome| !outcome.passed)
        .map(|outcome| outcome.name)
        .collect();
    if failed.is_empty() {
        info!(checks = outcomes.len(), "self-check passed");
        Ok(())
    } else {
        warn!(?failed, "self-check failed");
        Err(CliError::SelfCheck(failed.join(", ")))
    }
}

/// Runs the engine comparisons.
pub fn self_check() -> Result<Vec<CheckOutcome>> {
    let market = MarketParameters::new(100.0, 100.0, 1.0, 0.04, 0.2);
    let call = price_closed_form(&market, ClosedFormInstrument::european(OptionType::Call))?;
    let put = price_closed_form(&market, ClosedFormInstrument::european(OptionType::Put))?;

    let forward = market.spot - market.strike * market.discount_factor();
    let parity_gap = (call - put - forward).abs();

    let tree_call = price_binomial(&market, LATTICE_STEPS, OptionType::Call, ExerciseStyle::European)?;
    let tree_put = price_binomial(&market, LATTICE_STEPS, OptionType::Put, ExerciseStyle::American)?;

    let mc_config = MonteCarloConfig::builder()
        .n_paths(MC_PATHS)
        .n_steps(1)
        .seed(MC_SEED)
        .build()?;
    let mc_call = price_monte_carlo(&market, &mc_config, McPayoff::European(OptionType::Call))?;

    Ok(vec![
        CheckOutcome {
            name: "put-call parity",
            passed: parity_gap < PARITY_TOLERANCE,
            detail: format!("C - P - (S - K·e^(-rT)) = {:.2e}", parity_gap),
        },
        CheckOutcome {
            name: "binomial vs closed form",
            passed: (tree_call - call).abs() < LATTICE_TOLERANCE,
            detail: format!("{:.6} vs {:.6} ({} steps)", tree_call, call, LATTICE_STEPS),
        },
        CheckOutcome {
            name: "american put premium",
            passed: tree_put >= put,
            detail: format!("{:.6} >= {:.6}", tree_put, put),
        },
        CheckOutcome {
            name: "monte carlo vs closed form",
            passed: mc_call.contains(call, MC_STD_ERRORS),
            detail: format!(
                "{:.6} ± {:.6} vs {:.6} ({} paths)",
                mc_call.price, mc_call.std_error, call, MC_PATHS
            ),
        },
    ])
}
