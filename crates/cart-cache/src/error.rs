//! Cache error types.

use cart_core::CartError;
use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to read or write the backing medium.
    #[error("I/O error: {0}")]
    Io(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::Io(e.to_string())
    }
}

impl From<CacheError> for CartError {
    fn from(e: CacheError) -> Self {
        match e {
            CacheError::SerializeError(e) => CartError::Serialization(e.to_string()),
            other => CartError::Storage(other.to_string()),
        }
    }
}
