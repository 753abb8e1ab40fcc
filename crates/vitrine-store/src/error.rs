//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using durable client storage.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to serialize or deserialize a stored value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to read or write the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend rejected the operation.
    #[error("Store operation failed: {0}")]
    Backend(String),
}
