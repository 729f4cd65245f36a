//! Pricer CLI - Command Line Option Pricing
//!
//! Operational entry point for the closed-form, Monte Carlo and binomial
//! option pricers.
//!
//! # Commands
//!
//! - `pricer price closed-form ...` - Black-Scholes family closed forms
//! - `pricer price monte-carlo ...` - simulation with standard error
//! - `pricer price binomial ...` - CRR tree, European or American
//! - `pricer check` - print the resolved configuration and cross-check engines
//!
//! # Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` selects the filter;
//! without it the level is `info`, or `debug` with `--verbose`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use crate::commands::price::PriceMethod;
use crate::config::CliConfig;

/// Option pricing engines
#[derive(Debug, Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "pricer.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price one option
    Price {
        #[command(subcommand)]
        method: PriceMethod,
    },

    /// Print the resolved configuration and cross-check the engines
    Check,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::load(&cli.config)?;
    debug!(path = %cli.config.display(), ?config, "configuration resolved");

    match cli.command {
        Commands::Price { method } => commands::price::run(method, &config),
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::price::Instrument;
    use crate::config::OutputFormat;
    use clap::CommandFactory;
    use pricer_core::types::{ExerciseStyle, OptionType};
    use pricer_pricing::path_dependent::Monitoring;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_monte_carlo() {
        let cli = Cli::try_parse_from([
            "pricer", "price", "monte-carlo", "--spot", "100", "--strike", "100",
            "--maturity", "1", "--rate", "0.04", "--volatility", "0.2", "--barrier", "115",
            "--instrument", "up-out", "--paths", "100000", "--steps", "252", "--seed", "42",
            "--monitoring", "discrete", "--format", "json",
        ])
        .unwrap();

        let Commands::Price {
            method: PriceMethod::MonteCarlo {
                contract,
                simulation,
            },
        } = cli.command
        else {
            panic!("expected monte-carlo");
        };
        assert_eq!(contract.instrument, Instrument::UpOut);
        assert_eq!(contract.barrier, Some(115.0));
        assert_eq!(contract.payoff, OptionType::Call);
        assert_eq!(contract.format, Some(OutputFormat::Json));
        assert_eq!(simulation.paths, Some(100_000));
        assert_eq!(simulation.seed, Some(42));
        assert_eq!(simulation.monitoring, Some(Monitoring::Discrete));
    }

    #[test]
    fn test_parse_binomial_with_dividends() {
        let cli = Cli::try_parse_from([
            "pricer", "--verbose", "price", "binomial", "--spot", "100", "--strike", "100",
            "--maturity", "1", "--rate", "-0.01", "--volatility", "0.2", "--payoff", "put",
            "--exercise", "american", "--dividend", "0.3:0.05", "--dividend", "0.8:0.05",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("pricer.toml"));
        let Commands::Price {
            method: PriceMethod::Binomial { contract, steps },
        } = cli.command
        else {
            panic!("expected binomial");
        };
        assert_eq!(steps, None);
        assert_eq!(contract.rate, -0.01);
        assert_eq!(contract.exercise, ExerciseStyle::American);
        assert_eq!(contract.dividends.len(), 2);
    }

    #[test]
    fn test_rejects_unknown_payoff() {
        let result = Cli::try_parse_from([
            "pricer", "price", "closed-form", "--spot", "100", "--maturity", "1",
            "--rate", "0.04", "--volatility", "0.2", "--payoff", "straddle",
        ]);
        assert!(result.is_err());
    }
}
