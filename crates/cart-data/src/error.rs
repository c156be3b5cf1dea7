//! Fetch errors.

use std::time::Duration;

use cart_core::{CartError, ProductId};

use crate::DependencyTag;

/// Error type for catalog and stock lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("No {dependency} record for product {product_id}")]
    NotFound {
        dependency: DependencyTag,
        product_id: ProductId,
    },

    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl FetchError {
    /// Shorthand for a missing record.
    pub fn not_found(dependency: DependencyTag, product_id: ProductId) -> Self {
        Self::NotFound {
            dependency,
            product_id,
        }
    }
}

impl From<FetchError> for CartError {
    fn from(e: FetchError) -> Self {
        CartError::Fetch(e.to_string())
    }
}
