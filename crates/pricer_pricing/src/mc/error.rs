//! Error types for the Monte Carlo engine.
//!
//! Configuration problems are reported as [`ConfigError`] and convert into
//! the shared [`PricingError`] taxonomy at the pricing facades.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error for the Monte Carlo pricer.
///
/// These errors occur at build time when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Path count outside the valid range.
    #[error("Invalid path count {0}: must be in range [2, 10_000_000]")]
    InvalidPathCount(usize),
    /// Step count outside the valid range.
    #[error("Invalid step count {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidPathCount(_) => PricingError::invalid("n_paths", err.to_string()),
            ConfigError::InvalidStepCount(_) => PricingError::invalid("n_steps", err.to_string()),
            ConfigError::InvalidParameter { name, value } => PricingError::invalid(name, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::InvalidStepCount(20_000);
        assert!(err.to_string().contains("Invalid step count 20000"));

        let err = ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        };
        assert!(err.to_string().contains("n_paths"));
    }

    #[test]
    fn test_converts_into_invalid_parameter() {
        let err: PricingError = ConfigError::InvalidStepCount(0).into();
        assert_eq!(err.parameter(), Some("n_steps"));

        let err: PricingError = ConfigError::InvalidPathCount(1).into();
        assert_eq!(err.parameter(), Some("n_paths"));
    }
}
