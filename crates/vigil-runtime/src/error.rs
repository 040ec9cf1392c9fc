//! Runtime error types

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Storage-layer failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Anomaly scorer failure
    #[error("Scorer error: {0}")]
    ScorerError(String),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
