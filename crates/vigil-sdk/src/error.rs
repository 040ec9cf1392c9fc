//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Runtime error (storage or scorer)
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] vigil_runtime::RuntimeError),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
