//! In-memory collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cart_core::prelude::*;
use parking_lot::RwLock;

use crate::{DependencyTag, FetchError, ProductCatalog, StockService};

/// A catalog served from memory.
///
/// Counts lookups so callers can assert whether the network would have been
/// touched.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    products: RwLock<HashMap<ProductId, ProductMetadata>>,
    latency: Option<Duration>,
    lookups: AtomicUsize,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product (builder style).
    pub fn with_product(self, product: ProductMetadata) -> Self {
        self.insert(product);
        self
    }

    /// Delay every lookup, to simulate a slow network.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add or replace a product.
    pub fn insert(&self, product: ProductMetadata) {
        self.products.write().insert(product.id, product);
    }

    /// All products, ordered by id.
    pub fn products(&self) -> Vec<ProductMetadata> {
        let mut products: Vec<_> = self.products.read().values().cloned().collect();
        products.sort_by_key(|p| p.id);
        products
    }

    /// Number of lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCatalog for StaticCatalog {
    async fn product(&self, id: ProductId) -> Result<ProductMetadata, FetchError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.products
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| FetchError::not_found(DependencyTag::Catalog, id))
    }
}

/// Stock levels served from memory.
#[derive(Debug, Default)]
pub struct StaticStock {
    levels: RwLock<HashMap<ProductId, i64>>,
    latency: Option<Duration>,
    lookups: AtomicUsize,
}

impl StaticStock {
    /// Create an empty stock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level for a product (builder style).
    pub fn with_stock(self, id: ProductId, amount: i64) -> Self {
        self.set(id, amount);
        self
    }

    /// Delay every lookup, to simulate a slow network.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Set or replace the level for a product.
    pub fn set(&self, id: ProductId, amount: i64) {
        self.levels.write().insert(id, amount);
    }

    /// Drop the record for a product; later lookups fail with not-found.
    pub fn remove(&self, id: ProductId) {
        self.levels.write().remove(&id);
    }

    /// Current level for a product, without counting a lookup.
    pub fn level(&self, id: ProductId) -> Option<i64> {
        self.levels.read().get(&id).copied()
    }

    /// Number of lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StockService for StaticStock {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.level(id)
            .map(|amount| StockRecord::new(id, amount))
            .ok_or_else(|| FetchError::not_found(DependencyTag::Inventory, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_lookup() {
        let catalog = StaticCatalog::new().with_product(ProductMetadata::new(
            ProductId::new(1),
            "Tênis",
            179.9,
            "a.jpg",
        ));

        let product = catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(product.title, "Tênis");

        let missing = catalog.product(ProductId::new(2)).await;
        assert_eq!(
            missing,
            Err(FetchError::not_found(DependencyTag::Catalog, ProductId::new(2)))
        );
        assert_eq!(catalog.lookups(), 2);
    }

    #[tokio::test]
    async fn test_stock_lookup() {
        let stock = StaticStock::new().with_stock(ProductId::new(1), 3);

        let record = stock.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(record, StockRecord::new(ProductId::new(1), 3));

        stock.set(ProductId::new(1), 0);
        assert!(stock.stock(ProductId::new(1)).await.unwrap().is_out_of_stock());
        assert_eq!(stock.lookups(), 2);

        stock.remove(ProductId::new(1));
        assert_eq!(
            stock.stock(ProductId::new(1)).await,
            Err(FetchError::not_found(DependencyTag::Inventory, ProductId::new(1)))
        );
    }
}
