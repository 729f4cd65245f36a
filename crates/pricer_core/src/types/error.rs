//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: the single error taxonomy shared by every pricer
//!
//! All three variants are deterministic input errors. They are detected at
//! the start of (or during) a pricing call and surfaced immediately; none of
//! them is transient, so callers should never retry.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidParameter`: a market or method parameter violates its domain
/// - `UnsupportedPayoff`: payoff or exercise selector the method cannot price
/// - `InconsistentModel`: derived model quantity outside its valid range
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid("volatility", "must be positive, got -0.2");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'volatility': must be positive, got -0.2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A parameter is outside its valid domain.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Description of the violation
        message: String,
    },

    /// Payoff or exercise-style selector outside the recognised enumeration,
    /// or a combination the chosen method does not support.
    #[error("Unsupported payoff: {0}")]
    UnsupportedPayoff(String),

    /// Model parameters imply an invalid probability measure.
    #[error("Inconsistent model: {message} (p = {probability})")]
    InconsistentModel {
        /// The derived probability that fell outside (0, 1)
        probability: f64,
        /// Description of the inconsistency
        message: String,
    },
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    #[inline]
    pub fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Shorthand for [`PricingError::UnsupportedPayoff`].
    #[inline]
    pub fn unsupported(message: impl Into<String>) -> Self {
        PricingError::UnsupportedPayoff(message.into())
    }

    /// Returns the parameter name for `InvalidParameter` errors.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            PricingError::InvalidParameter { name, .. } => Some(name),
            _ => None,
        }
    }
}
