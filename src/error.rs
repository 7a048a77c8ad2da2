//! Error types for biomass-sim.
//!
//! All fallible operations return `Result<T, SimError>` instead of panicking.
//! Model errors abort the whole run: no partial results are returned.

use thiserror::Error;

/// Result type alias for biomass-sim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all biomass-sim operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Model Errors =====
    /// Functional response label is not one of `Type I`, `Type II`, `Type III`.
    #[error("Unknown functional response type: {kind}")]
    UnknownFunctionalResponseKind {
        /// The unrecognized label.
        kind: String,
    },

    /// Scenario failed upfront validation.
    #[error("Scenario validation error: {message}")]
    ScenarioValidation {
        /// Description of the violated invariant.
        message: String,
    },

    /// A species name did not resolve to a species in the scenario.
    #[error("Unknown species '{name}'")]
    UnknownSpecies {
        /// The missing species name.
        name: String,
    },

    /// Numerical instability detected (NaN or Inf) after a tick.
    #[error("Non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// Repeated runs of the same scenario produced different output.
    #[error("Run {run} diverged from run 0 at {location}")]
    NonReproducible {
        /// Index of the diverging run.
        run: usize,
        /// First differing point, as `species[index]`.
        location: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Field-level validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SimError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a scenario validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ScenarioValidation {
            message: message.into(),
        }
    }

    /// Create an unknown-species error.
    #[must_use]
    pub fn unknown_species(name: impl Into<String>) -> Self {
        Self::UnknownSpecies { name: name.into() }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error comes from the model itself rather than from
    /// configuration or I/O.
    #[must_use]
    pub const fn is_fatal_model_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownFunctionalResponseKind { .. }
                | Self::ScenarioValidation { .. }
                | Self::UnknownSpecies { .. }
                | Self::NonFiniteValue { .. }
        )
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
