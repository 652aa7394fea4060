//! Error type for generator operations.

use rand::distributions::WeightedError;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A child entity was requested but its parent set is empty
    #[error("Cannot generate {child}: no {parent} to reference")]
    MissingParents {
        child: &'static str,
        parent: &'static str,
    },

    /// Invalid categorical weights
    #[error("Invalid weights: {0}")]
    Weights(#[from] WeightedError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] seed_core::ConfigError),
}
