//! Error types for spam-api

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for startup and configuration operations
pub type Result<T> = std::result::Result<T, SpamApiError>;

/// Top-level service errors
#[derive(Error, Debug)]
pub enum SpamApiError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact loading error
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Errors raised while loading the model or vectorizer
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Artifact file does not exist
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    /// Artifact file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact file is not a valid artifact document
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact parsed but its contents are inconsistent
    #[error("Invalid artifact: {0}")]
    Invalid(String),
}

/// Errors raised while classifying a message
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Feature vector does not match the model's feature count
    #[error("Feature dimension mismatch: model expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Model returned no class probabilities
    #[error("Model returned no class probabilities")]
    EmptyProbabilities,

    /// Model returned NaN or infinite probabilities
    #[error("Model returned a non-finite confidence")]
    NonFinite,

    /// Any other failure reported by a model implementation
    #[error("{0}")]
    Model(String),
}
