//! Store error types.

use thiserror::Error;

/// Errors that can occur when using the durable store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing file.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// Failed to write the backing file.
    #[error("Store write failed: {0}")]
    Write(String),

    /// Failed to serialize the store image.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
