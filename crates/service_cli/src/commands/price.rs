//! Price command implementation
//!
//! Prices one contract with the closed-form, Monte Carlo or binomial engine.

use clap::{Args, Subcommand, ValueEnum};
use pricer_core::types::{
    Dividend, DividendSchedule, ExerciseStyle, MarketParameters, OptionType, PriceEstimate,
};
use pricer_models::analytical::{
    price_closed_form, BarrierDirection, BarrierType, ClosedFormInstrument, KnockType,
};
use pricer_pricing::lattice::price_binomial;
use pricer_pricing::mc::{price_monte_carlo, McPayoff};
use pricer_pricing::path_dependent::{Averaging, Monitoring};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Pricing engine selection.
#[derive(Debug, Subcommand)]
pub enum PriceMethod {
    /// Black-Scholes closed forms (vanilla, barrier, lookback, geometric Asian)
    ClosedForm {
        #[command(flatten)]
        contract: ContractArgs,

        /// Fixings of a geometric Asian (continuous sampling when omitted)
        #[arg(long)]
        fixings: Option<usize>,
    },

    /// Monte Carlo simulation
    MonteCarlo {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        simulation: SimulationArgs,
    },

    /// Cox-Ross-Rubinstein binomial tree (vanilla only)
    Binomial {
        #[command(flatten)]
        contract: ContractArgs,

        /// Tree steps
        #[arg(long)]
        steps: Option<usize>,
    },
}

/// Contract kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Instrument {
    /// European or American call/put
    #[default]
    Vanilla,
    /// Up-and-out barrier
    UpOut,
    /// Up-and-in barrier
    UpIn,
    /// Down-and-out barrier
    DownOut,
    /// Down-and-in barrier
    DownIn,
    /// Floating-strike lookback
    Lookback,
    /// Fixed-strike average price
    Asian,
}

impl Instrument {
    fn barrier_type(self, option_type: OptionType) -> Option<BarrierType> {
        let (direction, knock) = match self {
            Instrument::UpOut => (BarrierDirection::Up, KnockType::Out),
            Instrument::UpIn => (BarrierDirection::Up, KnockType::In),
            Instrument::DownOut => (BarrierDirection::Down, KnockType::Out),
            Instrument::DownIn => (BarrierDirection::Down, KnockType::In),
            Instrument::Vanilla | Instrument::Lookback | Instrument::Asian => return None,
        };
        Some(BarrierType::new(direction, knock, option_type))
    }

    fn name(self) -> &'static str {
        match self {
            Instrument::Vanilla => "vanilla",
            Instrument::UpOut => "up-out",
            Instrument::UpIn => "up-in",
            Instrument::DownOut => "down-out",
            Instrument::DownIn => "down-in",
            Instrument::Lookback => "lookback",
            Instrument::Asian => "asian",
        }
    }
}

/// Market data and contract terms shared by every engine.
#[derive(Debug, Clone, Args)]
pub struct ContractArgs {
    /// Spot price S0
    #[arg(long)]
    pub spot: f64,

    /// Strike K (ignored by floating lookbacks)
    #[arg(long, default_value_t = 0.0)]
    pub strike: f64,

    /// Maturity in years
    #[arg(long)]
    pub maturity: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, allow_negative_numbers = true)]
    pub rate: f64,

    /// Annualised volatility
    #[arg(long)]
    pub volatility: f64,

    /// Barrier level
    #[arg(long)]
    pub barrier: Option<f64>,

    /// Proportional dividend as `time:proportion`, repeatable
    #[arg(long = "dividend", value_parser = parse_dividend)]
    pub dividends: Vec<Dividend>,

    /// Call or put
    #[arg(long, default_value = "call")]
    pub payoff: OptionType,

    /// European or American exercise
    #[arg(long, default_value = "european")]
    pub exercise: ExerciseStyle,

    /// Contract kind
    #[arg(long, value_enum, default_value_t = Instrument::Vanilla)]
    pub instrument: Instrument,

    /// Output format (overrides the configuration)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl ContractArgs {
    /// Assembles the market parameters.
    pub fn market(&self) -> MarketParameters {
        let mut dividends = DividendSchedule::new();
        for &dividend in &self.dividends {
            dividends.push(dividend);
        }
        let market = MarketParameters::new(
            self.spot,
            self.strike,
            self.maturity,
            self.rate,
            self.volatility,
        )
        .with_dividends(dividends);
        match self.barrier {
            Some(barrier) => market.with_barrier(barrier),
            None => market,
        }
    }

    fn require_european_for_exotics(&self) -> Result<()> {
        if self.instrument != Instrument::Vanilla && self.exercise.allows_early_exercise() {
            return Err(CliError::InvalidArgument(format!(
                "american exercise applies to vanilla options only, got {}",
                self.instrument.name()
            )));
        }
        Ok(())
    }
}

/// Simulation overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct SimulationArgs {
    /// Number of paths
    #[arg(long)]
    pub paths: Option<usize>,

    /// Time steps per path
    #[arg(long)]
    pub steps: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Barrier/lookback monitoring (discrete, continuity-corrected)
    #[arg(long)]
    pub monitoring: Option<Monitoring>,

    /// Asian averaging (arithmetic, geometric)
    #[arg(long)]
    pub averaging: Option<Averaging>,
}

/// Priced result as printed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReport {
    /// Engine name
    pub method: &'static str,
    /// Contract kind
    pub instrument: &'static str,
    /// Call or put
    pub option_type: OptionType,
    /// Exercise style
    pub exercise: ExerciseStyle,
    /// Present value
    pub price: f64,
    /// Standard error (Monte Carlo only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_error: Option<f64>,
    /// 95% confidence half-width (Monte Carlo only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_95: Option<f64>,
    /// Simulated paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<usize>,
    /// Time or tree steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    /// Seed of a reproducible run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl PriceReport {
    fn new(method: &'static str, contract: &ContractArgs, price: f64) -> Self {
        Self {
            method,
            instrument: contract.instrument.name(),
            option_type: contract.payoff,
            exercise: contract.exercise,
            price,
            std_error: None,
            confidence_95: None,
            paths: None,
            steps: None,
            seed: None,
        }
    }

    fn with_estimate(mut self, estimate: PriceEstimate) -> Self {
        self.std_error = Some(estimate.std_error);
        self.confidence_95 = Some(estimate.confidence_95());
        self
    }
}

/// Run the price command
pub fn run(method: PriceMethod, config: &CliConfig) -> Result<()> {
    let (report, format) = evaluate(method, config)?;
    println!("{}", render(&report, format, config.output.precision)?);
    Ok(())
}

/// Prices the selected contract and resolves the output format.
pub fn evaluate(method: PriceMethod, config: &CliConfig) -> Result<(PriceReport, OutputFormat)> {
    let (report, format) = match method {
        PriceMethod::ClosedForm { contract, fixings } => {
            (closed_form(&contract, fixings)?, contract.format)
        }
        PriceMethod::MonteCarlo {
            contract,
            simulation,
        } => (monte_carlo(&contract, &simulation, config)?, contract.format),
        PriceMethod::Binomial { contract, steps } => {
            let steps = steps.unwrap_or(config.lattice.n_steps);
            (binomial(&contract, steps)?, contract.format)
        }
    };
    info!(
        method = report.method,
        instrument = report.instrument,
        price = report.price,
        "pricing complete"
    );
    Ok((report, format.unwrap_or(config.output.format)))
}

fn closed_form(contract: &ContractArgs, fixings: Option<usize>) -> Result<PriceReport> {
    contract.require_european_for_exotics()?;
    let option_type = contract.payoff;
    let instrument = match contract.instrument {
        Instrument::Vanilla => ClosedFormInstrument::Vanilla {
            option_type,
            exercise: contract.exercise,
        },
        Instrument::Lookback => ClosedFormInstrument::LookbackFloating { option_type },
        Instrument::Asian => ClosedFormInstrument::GeometricAsian {
            option_type,
            fixings,
        },
        barrier => ClosedFormInstrument::Barrier {
            barrier_type: barrier_type_of(barrier, option_type)?,
        },
    };
    let price = price_closed_form(&contract.market(), instrument)?;
    Ok(PriceReport::new("closed-form", contract, price))
}

fn monte_carlo(
    contract: &ContractArgs,
    simulation: &SimulationArgs,
    config: &CliConfig,
) -> Result<PriceReport> {
    contract.require_european_for_exotics()?;
    let settings = &config.monte_carlo;
    let mc_config = settings.resolve(simulation.paths, simulation.steps, simulation.seed)?;
    let monitoring = simulation.monitoring.unwrap_or(settings.monitoring);
    let option_type = contract.payoff;

    let payoff = match contract.instrument {
        Instrument::Vanilla if contract.exercise.allows_early_exercise() => {
            McPayoff::American(option_type)
        }
        Instrument::Vanilla => McPayoff::European(option_type),
        Instrument::Lookback => McPayoff::Lookback {
            option_type,
            monitoring,
        },
        Instrument::Asian => McPayoff::Asian {
            option_type,
            averaging: simulation.averaging.unwrap_or(settings.averaging),
        },
        barrier => McPayoff::Barrier {
            barrier_type: barrier_type_of(barrier, option_type)?,
            monitoring,
        },
    };

    let estimate = price_monte_carlo(&contract.market(), &mc_config, payoff)?;
    let mut report = PriceReport::new("monte-carlo", contract, estimate.price).with_estimate(estimate);
    report.paths = Some(mc_config.n_paths());
    report.steps = Some(mc_config.n_steps());
    report.seed = mc_config.seed();
    Ok(report)
}

fn binomial(contract: &ContractArgs, steps: usize) -> Result<PriceReport> {
    if contract.instrument != Instrument::Vanilla {
        return Err(CliError::InvalidArgument(format!(
            "the binomial tree prices vanilla options only, got {}",
            contract.instrument.name()
        )));
    }
    let price = price_binomial(&contract.market(), steps, contract.payoff, contract.exercise)?;
    let mut report = PriceReport::new("binomial", contract, price);
    report.steps = Some(steps);
    Ok(report)
}

fn barrier_type_of(instrument: Instrument, option_type: OptionType) -> Result<BarrierType> {
    instrument.barrier_type(option_type).ok_or_else(|| {
        CliError::InvalidArgument(format!("{} is not a barrier option", instrument.name()))
    })
}

/// Parses `time:proportion`.
fn parse_dividend(s: &str) -> std::result::Result<Dividend, String> {
    let (time, proportion) = s
        .split_once(':')
        .ok_or_else(|| format!("expected time:proportion, got '{}'", s))?;
    let time: f64 = time
        .trim()
        .parse()
        .map_err(|_| format!("invalid dividend time '{}'", time))?;
    let proportion: f64 = proportion
        .trim()
        .parse()
        .map_err(|_| format!("invalid dividend proportion '{}'", proportion))?;
    Ok(Dividend::new(time, proportion))
}

/// Formats a report as a table or JSON.
pub fn render(report: &PriceReport, format: OutputFormat, precision: usize) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(render_table(report, precision)),
    }
}

fn render_table(report: &PriceReport, precision: usize) -> String {
    let mut rows = vec![
        ("Method", report.method.to_string()),
        ("Instrument", report.instrument.to_string()),
        ("Payoff", report.option_type.to_string()),
        ("Exercise", report.exercise.to_string()),
        ("Price", format!("{:.*}", precision, report.price)),
    ];
    if let Some(se) = report.std_error {
        rows.push(("Std error", format!("{:.*}", precision, se)));
    }
    if let Some(ci) = report.confidence_95 {
        rows.push(("95% CI", format!("± {:.*}", precision, ci)));
    }
    if let Some(paths) = report.paths {
        rows.push(("Paths", paths.to_string()));
    }
    if let Some(steps) = report.steps {
        rows.push(("Steps", steps.to_string()));
    }
    if let Some(seed) = report.seed {
        rows.push(("Seed", seed.to_string()));
    }

    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0)
        .max(12);
    let border = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(12),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    let mut lines = vec![border("┌", "┬", "┐")];
    for (label, value) in &rows {
        lines.push(format!("│ {:<10} │ {:<width$} │", label, value, width = value_width));
    }
    lines.push(border("└", "┴", "┘"));
    lines.join("\n")
}
