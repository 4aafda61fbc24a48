//! Error types for matrix_core.
//!
//! Only configuration can be invalid. Once a [`crate::world::World`] is
//! constructed no per-tick operation fails; out-of-range values are clamped.

use thiserror::Error;

/// Rejection of a configuration value.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Grid width or height is zero
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    /// Population floor above the ceiling
    #[error("min_agents ({min}) exceeds max_agents ({max})")]
    PopulationBounds { min: usize, max: usize },

    /// Probability or fraction outside [0, 1]
    #[error("{field} must be in [0.0, 1.0], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    /// Rate, cost or threshold below zero or not finite
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// Value that must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// Malformed TOML
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    pub(crate) fn unit_range(field: &'static str, value: f64) -> Result<()> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::OutOfUnitRange { field, value })
        }
    }

    pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<()> {
        if value >= 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(Self::Negative { field, value })
        }
    }

    pub(crate) fn positive(field: &'static str, value: f64) -> Result<()> {
        if value > 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonPositive { field, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::PopulationBounds { min: 10, max: 5 };
        assert_eq!(err.to_string(), "min_agents (10) exceeds max_agents (5)");
    }

    #[test]
    fn test_checks_reject_nan() {
        assert!(ConfigError::unit_range("x", f64::NAN).is_err());
        assert!(ConfigError::non_negative("x", f64::NAN).is_err());
        assert!(ConfigError::positive("x", f64::NAN).is_err());
        assert!(ConfigError::unit_range("x", 1.0).is_ok());
        assert!(ConfigError::non_negative("x", 0.0).is_ok());
        assert!(ConfigError::positive("x", 0.0).is_err());
    }

    #[test]
    fn test_checks_reject_infinity() {
        assert!(ConfigError::non_negative("x", f64::INFINITY).is_err());
        assert!(ConfigError::positive("x", f64::INFINITY).is_err());
        assert!(ConfigError::non_negative("x", f64::MAX).is_ok());
    }
}
