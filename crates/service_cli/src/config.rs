//! CLI configuration management
//!
//! Settings are layered, lowest priority first:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config`, default `pricer.toml`)
//! 3. `PRICER_*` environment variables, sections separated by `__`
//!    (`PRICER_MONTE_CARLO__N_PATHS=50000`, `PRICER_OUTPUT__FORMAT=json`)
//!
//! Command-line flags override the resolved values per invocation.
//!
//! ```toml
//! [monte_carlo]
//! n_paths = 100000
//! n_steps = 252
//! seed = 42
//! monitoring = "continuity-corrected"
//! averaging = "arithmetic"
//!
//! [lattice]
//! n_steps = 1000
//!
//! [output]
//! format = "table"
//! precision = 6
//! ```

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use ::config::builder::DefaultState;
use ::config::{ConfigBuilder, Environment, File, FileFormat};
use clap::ValueEnum;
use pricer_pricing::lattice::MAX_TREE_STEPS;
use pricer_pricing::mc::MonteCarloConfig;
use pricer_pricing::path_dependent::{Averaging, Monitoring};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{CliError, Result};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PRICER";

/// Largest number of printed decimals.
const MAX_PRECISION: usize = 12;

/// Output format of priced results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// One JSON object
    Json,
}

/// Default simulation settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MonteCarloSettings {
    /// Number of simulated paths
    pub n_paths: usize,
    /// Time steps per path
    pub n_steps: usize,
    /// Base seed; a fresh seed is drawn when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Barrier and lookback monitoring
    #[serde(
        deserialize_with = "deserialize_from_str",
        serialize_with = "serialize_display"
    )]
    pub monitoring: Monitoring,
    /// Asian averaging
    #[serde(
        deserialize_with = "deserialize_from_str",
        serialize_with = "serialize_display"
    )]
    pub averaging: Averaging,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            n_paths: 100_000,
            n_steps: 252,
            seed: None,
            monitoring: Monitoring::default(),
            averaging: Averaging::default(),
        }
    }
}

impl MonteCarloSettings {
    /// Builds an engine configuration, letting explicit flags win.
    pub fn resolve(
        &self,
        n_paths: Option<usize>,
        n_steps: Option<usize>,
        seed: Option<u64>,
    ) -> Result<MonteCarloConfig> {
        Ok(MonteCarloConfig::builder()
            .n_paths(n_paths.unwrap_or(self.n_paths))
            .n_steps(n_steps.unwrap_or(self.n_steps))
            .maybe_seed(seed.or(self.seed))
            .build()?)
    }
}

/// Default lattice settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LatticeSettings {
    /// Tree steps
    pub n_steps: usize,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self { n_steps: 1_000 }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Result format
    pub format: OutputFormat,
    /// Decimals printed in tables
    pub precision: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 6,
        }
    }
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Monte Carlo defaults
    pub monte_carlo: MonteCarloSettings,
    /// Binomial lattice defaults
    pub lattice: LatticeSettings,
    /// Output defaults
    pub output: OutputSettings,
}

impl CliConfig {
    /// Loads defaults, the optional file at `path` and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::from(path).format(FileFormat::Toml).required(false);
        Self::from_builder(::config::Config::builder().add_source(file))
    }

    /// Parses TOML content layered with the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file = File::from_str(content, FileFormat::Toml);
        Self::from_builder(::config::Config::builder().add_source(file))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        let config: CliConfig = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.monte_carlo.resolve(None, None, None)?;

        if self.lattice.n_steps == 0 || self.lattice.n_steps > MAX_TREE_STEPS {
            return Err(CliError::InvalidArgument(format!(
                "lattice.n_steps must lie in [1, {}], got {}",
                MAX_TREE_STEPS, self.lattice.n_steps
            )));
        }

        if self.output.precision > MAX_PRECISION {
            return Err(CliError::InvalidArgument(format!(
                "output.precision must be at most {}, got {}",
                MAX_PRECISION, self.output.precision
            )));
        }

        Ok(())
    }
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

fn serialize_display<S, T>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.monte_carlo.n_paths, 100_000);
        assert_eq!(config.monte_carlo.n_steps, 252);
        assert_eq!(config.monte_carlo.monitoring, Monitoring::ContinuityCorrected);
        assert_eq!(config.lattice.n_steps, 1_000);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = CliConfig::from_toml_str(
            r#"
            [monte_carlo]
            n_paths = 5000
            seed = 7
            monitoring = "discrete"
            averaging = "geometric"

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.monte_carlo.n_paths, 5_000);
        assert_eq!(config.monte_carlo.n_steps, 252);
        assert_eq!(config.monte_carlo.seed, Some(7));
        assert_eq!(config.monte_carlo.monitoring, Monitoring::Discrete);
        assert_eq!(config.monte_carlo.averaging, Averaging::Geometric);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.lattice.n_steps, 1_000);
    }

    #[test]
    fn test_unknown_monitoring_rejected() {
        let result = CliConfig::from_toml_str(
            r#"
            [monte_carlo]
            monitoring = "weekly"
            "#,
        );
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let zero_paths = CliConfig::from_toml_str("[monte_carlo]\nn_paths = 0\n");
        assert!(matches!(zero_paths, Err(CliError::Simulation(_))));

        let zero_steps = CliConfig::from_toml_str("[lattice]\nn_steps = 0\n");
        assert!(matches!(zero_steps, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = CliConfig::load(Path::new("does-not-exist/pricer.toml")).unwrap();
        assert_eq!(config.lattice.n_steps, 1_000);
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = MonteCarloSettings {
            seed: Some(1),
            ..MonteCarloSettings::default()
        };
        let config = settings.resolve(Some(2_000), None, Some(9)).unwrap();
        assert_eq!(config.n_paths(), 2_000);
        assert_eq!(config.n_steps(), 252);
        assert_eq!(config.seed(), Some(9));
    }

    #[test]
    fn test_serialises_to_toml() {
        let text = toml::to_string_pretty(&CliConfig::default()).unwrap();
        assert!(text.contains("monitoring = \"continuity-corrected\""));
        assert!(text.contains("format = \"table\""));
        assert!(!text.contains("seed"));
    }
}
