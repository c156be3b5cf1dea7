//! Collaborator seams.

use std::sync::Arc;

use async_trait::async_trait;
use cart_core::prelude::*;

use crate::FetchError;

/// Source of product metadata.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch the product with `id`.
    async fn product(&self, id: ProductId) -> Result<ProductMetadata, FetchError>;
}

/// Source of stock availability.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Fetch the current stock record for `id`.
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError>;
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn product(&self, id: ProductId) -> Result<ProductMetadata, FetchError> {
        (**self).product(id).await
    }
}

#[async_trait]
impl<T: StockService + ?Sized> StockService for Arc<T> {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
        (**self).stock(id).await
    }
}
