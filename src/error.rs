//! Error types for swarmlab
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for configuration validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Dimensionality outside the supported range
    #[error("Unsupported dimensionality {0}: expected 2 or 3")]
    Dimension(usize),

    /// Population too small for the selected algorithm
    #[error("Population size {actual} is too small for {algorithm} (need at least {minimum})")]
    PopulationSize {
        algorithm: &'static str,
        minimum: usize,
        actual: usize,
    },

    /// Iteration budget of zero
    #[error("Maximum iterations must be positive")]
    MaxIterations,

    /// Probability-like parameter outside [0, 1]
    #[error("Parameter {name} must be within [0, 1], got {value}")]
    Rate { name: &'static str, value: f64 },

    /// Parameter that must be finite and non-negative
    #[error("Parameter {name} must be finite and non-negative, got {value}")]
    NonNegative { name: &'static str, value: f64 },

    /// Bounds that are inverted, empty or non-finite
    #[error("Invalid bounds: lower ({lower}) must be finite and below upper ({upper})")]
    Bounds { lower: f64, upper: f64 },

    /// Frequency range with min above max
    #[error("Invalid frequency range: min ({min}) must be <= max ({max})")]
    FrequencyRange { min: f64, max: f64 },
}

/// Top-level error type for engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// Non-finite fitness or position produced by a step
    #[error("Numerical instability: {0}")]
    Numerical(String),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// Command not valid in the current run state
    #[error("Invalid run state: {0}")]
    InvalidState(String),

    /// Configuration document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Dimension(4);
        assert_eq!(err.to_string(), "Unsupported dimensionality 4: expected 2 or 3");

        let err = ConfigError::PopulationSize {
            algorithm: "DE",
            minimum: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Population size 3 is too small for DE (need at least 4)"
        );

        let err = ConfigError::Rate {
            name: "crossoverRate",
            value: 1.5,
        };
        assert_eq!(
            err.to_string(),
            "Parameter crossoverRate must be within [0, 1], got 1.5"
        );
    }

    #[test]
    fn test_engine_error_from_config_error() {
        let engine_err: EngineError = ConfigError::MaxIterations.into();
        assert!(matches!(engine_err, EngineError::Configuration(_)));
        assert_eq!(
            engine_err.to_string(),
            "Invalid configuration: Maximum iterations must be positive"
        );
    }

    #[test]
    fn test_engine_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let engine_err: EngineError = json_err.into();
        assert!(matches!(engine_err, EngineError::Parse(_)));
    }
}
