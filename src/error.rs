//! Error types for the sales predictor

use thiserror::Error;

/// Result type alias for sales predictor operations
pub type Result<T> = std::result::Result<T, SalesError>;

/// Main error type for artifact loading and inference
#[derive(Error, Debug)]
pub enum SalesError {
    #[error("Failed to load artifact {path}: {reason}")]
    Artifact { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Feature names mismatch: model expects {expected:?}, got {actual:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SalesError {
    /// Wrap any displayable failure as an artifact error for `path`.
    pub fn artifact(path: impl AsRef<std::path::Path>, reason: impl std::fmt::Display) -> Self {
        SalesError::Artifact {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<polars::error::PolarsError> for SalesError {
    fn from(err: polars::error::PolarsError) -> Self {
        SalesError::Data(err.to_string())
    }
}

impl From<serde_json::Error> for SalesError {
    fn from(err: serde_json::Error) -> Self {
        SalesError::Serialization(err.to_string())
    }
}
