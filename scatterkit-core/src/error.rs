//! Error types for scatterkit-core.

use thiserror::Error;

/// Result type alias for scatterkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for scattering calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A model selector, species, or capability outside the supported set.
    #[error("unsupported model: {kind} '{value}'")]
    UnsupportedModel {
        /// What was being looked up.
        kind: &'static str,
        /// The offending name or variant.
        value: String,
    },

    /// Incident energy at or below the ionisation threshold of the model.
    #[error("incident energy {energy} eV is not above the {threshold} eV threshold")]
    BelowThreshold {
        /// Requested incident energy (eV).
        energy: f64,
        /// Model threshold (eV).
        threshold: f64,
    },

    /// Sampling table without valid probability mass.
    #[error("degenerate distribution: {0}")]
    DegenerateDistribution(String),

    /// Final-state kinematics with no physical solution.
    #[error("non-physical kinematics: {0}")]
    NonPhysicalKinematics(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Builds an [`Error::UnsupportedModel`] for the given lookup.
    pub fn unsupported(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnsupportedModel {
            kind,
            value: value.into(),
        }
    }
}
