//! CLI error type.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors surfaced by the `pricer` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected by a pricing engine.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Simulation settings out of range.
    #[error("Simulation configuration error: {0}")]
    Simulation(#[from] pricer_pricing::mc::ConfigError),

    /// Configuration file or environment could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Flag combination the command cannot honour.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Report could not be rendered as JSON.
    #[error("JSON serialisation error: {0}")]
    Json(#[from] serde_json::Error),

    /// Resolved configuration could not be rendered as TOML.
    #[error("TOML serialisation error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// One or more self-check comparisons failed.
    #[error("Self-check failed: {0}")]
    SelfCheck(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
