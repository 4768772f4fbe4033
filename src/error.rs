//! Error types for the simplex-sim library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Sweep exhausted: position {position} requested, sweep has {len} positions")]
    SweepExhausted { position: usize, len: usize },

    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Sample ID mismatch: {0}")]
    SampleMismatch(String),

    #[error("Missing column '{0}' in metadata")]
    MissingColumn(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Shorthand for a parameter-validation failure on a named argument.
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, SimError>;
