//! Cart error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The requested or implied quantity exceeds available stock.
    #[error("Out of stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// No line item for the product is in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// Requested quantity is not positive.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Catalog or stock lookup failed.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Persistent storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Persisted cart could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of a [`CartError`], for callers that react to the
/// kind of failure rather than its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfStock,
    NotFound,
    InvalidAmount,
    FetchFailure,
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::OutOfStock => "out_of_stock",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidAmount => "invalid_amount",
            ErrorKind::FetchFailure => "fetch_failure",
            ErrorKind::Storage => "storage",
        }
    }
}

impl CartError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::OutOfStock { .. } => ErrorKind::OutOfStock,
            CartError::NotFound(_) => ErrorKind::NotFound,
            CartError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            CartError::Fetch(_) => ErrorKind::FetchFailure,
            CartError::Storage(_) | CartError::Serialization(_) => ErrorKind::Storage,
        }
    }

    /// Whether this is a stock shortage.
    pub fn is_out_of_stock(&self) -> bool {
        self.kind() == ErrorKind::OutOfStock
    }
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 4,
            available: 3,
        };
        assert_eq!(err.kind(), ErrorKind::OutOfStock);
        assert!(err.is_out_of_stock());

        assert_eq!(CartError::NotFound(ProductId::new(1)).kind(), ErrorKind::NotFound);
        assert_eq!(CartError::InvalidAmount(0).kind(), ErrorKind::InvalidAmount);
        assert_eq!(CartError::Fetch("timeout".into()).kind(), ErrorKind::FetchFailure);
        assert_eq!(CartError::Serialization("bad".into()).kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_out_of_stock_message() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(2),
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Out of stock for product 2: requested 5, available 2"
        );
    }
}
