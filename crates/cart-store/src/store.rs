//! The cart store.

use std::sync::Arc;

use cart_cache::{Cache, CacheError, KeyValueStore};
use cart_core::prelude::*;
use cart_data::{ProductCatalog, StockService};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};

use crate::config::StoreConfig;
use crate::messages::Operation;
use crate::notify::{Notifier, TracingNotifier};

/// Request to set the quantity of a product already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// Shared handle to a cart.
///
/// Holds the current cart, mirrors it to storage after every successful
/// mutation, and checks stock before any mutation that grows a line.
///
/// Mutations are serialized: each one waits for the previous to persist and
/// publish before reading the cart, so overlapping calls never overwrite
/// each other. Reads never wait.
///
/// Every operation returns the newly published cart, or the reason it was
/// rejected. Rejections are also reported to the [`Notifier`] with one
/// user-facing message.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    catalog: Arc<dyn ProductCatalog>,
    stock: Arc<dyn StockService>,
    cache: Cache,
    notifier: Arc<dyn Notifier>,
    config: StoreConfig,
    writer: Mutex<()>,
    state: watch::Sender<Arc<Cart>>,
}

/// Builder for [`CartStore`].
pub struct CartStoreBuilder {
    catalog: Arc<dyn ProductCatalog>,
    stock: Arc<dyn StockService>,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    config: StoreConfig,
}

impl CartStoreBuilder {
    /// Set the store configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the sink for user-facing messages.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Rehydrate the cart from storage and open the store.
    ///
    /// A missing entry yields an empty cart. An entry that does not decode
    /// as a valid cart is discarded. A storage read failure is an error.
    pub fn open(self) -> Result<CartStore, CartError> {
        let cache = Cache::new(self.storage);
        let cart = rehydrate(&cache, &self.config.storage_key)?;
        tracing::debug!(
            key = %self.config.storage_key,
            items = cart.len(),
            "cart store opened"
        );

        let (state, _) = watch::channel(Arc::new(cart));
        Ok(CartStore {
            inner: Arc::new(Inner {
                catalog: self.catalog,
                stock: self.stock,
                cache,
                notifier: self.notifier,
                config: self.config,
                writer: Mutex::new(()),
                state,
            }),
        })
    }
}

fn rehydrate(cache: &Cache, key: &str) -> Result<Cart, CartError> {
    match cache.get::<Cart>(key) {
        Ok(cart) => Ok(cart.unwrap_or_default()),
        Err(CacheError::SerializeError(error)) => {
            tracing::warn!(key, %error, "discarding unreadable persisted cart");
            Ok(Cart::new())
        }
        Err(e) => Err(e.into()),
    }
}

impl CartStore {
    /// Start building a store from its collaborators.
    pub fn builder(
        catalog: impl ProductCatalog + 'static,
        stock: impl StockService + 'static,
        storage: impl KeyValueStore + 'static,
    ) -> CartStoreBuilder {
        CartStoreBuilder {
            catalog: Arc::new(catalog),
            stock: Arc::new(stock),
            storage: Arc::new(storage),
            notifier: Arc::new(TracingNotifier),
            config: StoreConfig::default(),
        }
    }

    /// The current cart.
    pub fn cart(&self) -> Arc<Cart> {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to published carts.
    ///
    /// The receiver starts at the current cart and sees every later publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.inner.state.subscribe()
    }

    /// Key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.inner.config.storage_key
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart is incremented only if stock exceeds
    /// the amount held. A new product needs positive stock, and its metadata
    /// is fetched from the catalog.
    pub async fn add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        tracing::debug!(%product_id, "add_product");
        let _turn = self.inner.writer.lock().await;
        let result = self.apply_add(product_id).await;
        self.report(Operation::AddProduct, product_id, result)
    }

    /// Remove a product's line from the cart.
    ///
    /// No lookups are made; the call only waits for earlier mutations.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        tracing::debug!(%product_id, "remove_product");
        let _turn = self.inner.writer.lock().await;
        let result = self
            .cart()
            .without(product_id)
            .and_then(|next| self.commit(next));
        self.report(Operation::RemoveProduct, product_id, result)
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Non-positive amounts and products not in the cart are rejected
    /// without a lookup. Otherwise stock must cover the requested amount;
    /// holding exactly the available stock is allowed.
    pub async fn update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<Arc<Cart>, CartError> {
        let UpdateProductAmount { product_id, amount } = request;
        tracing::debug!(%product_id, amount, "update_product_amount");
        let _turn = self.inner.writer.lock().await;
        let result = self.apply_update(product_id, amount).await;
        self.report(Operation::UpdateProductAmount, product_id, result)
    }

    async fn apply_add(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let current = self.cart();

        let next = match current.amount_of(product_id) {
            Some(held) => {
                let stock = self.inner.stock.stock(product_id).await?;
                if !stock.allows_increment(held) {
                    return Err(CartError::OutOfStock {
                        product_id,
                        requested: held.saturating_add(1),
                        available: stock.amount,
                    });
                }
                current.with_incremented(product_id)?
            }
            None => {
                let stock = self.inner.stock.stock(product_id).await?;
                if stock.is_out_of_stock() {
                    return Err(CartError::OutOfStock {
                        product_id,
                        requested: 1,
                        available: stock.amount,
                    });
                }
                let product = self.inner.catalog.product(product_id).await?;
                if product.id != product_id {
                    return Err(CartError::Fetch(format!(
                        "catalog returned product {} for {}",
                        product.id, product_id
                    )));
                }
                current.with_added(product)
            }
        };

        self.commit(next)
    }

    async fn apply_update(&self, product_id: ProductId, amount: i64) -> Result<Arc<Cart>, CartError> {
        if amount <= 0 {
            return Err(CartError::InvalidAmount(amount));
        }

        let current = self.cart();
        if !current.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }

        let stock = self.inner.stock.stock(product_id).await?;
        if !stock.covers(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let next = current.with_amount(product_id, amount)?;
        self.commit(next)
    }

    /// Persist then publish. Nothing is published if the write fails, so
    /// the published cart always matches storage.
    fn commit(&self, next: Cart) -> Result<Arc<Cart>, CartError> {
        self.inner.cache.set(&self.inner.config.storage_key, &next)?;

        let next = Arc::new(next);
        self.inner.state.send_replace(Arc::clone(&next));
        tracing::info!(
            items = next.len(),
            units = next.item_count(),
            "cart updated"
        );
        Ok(next)
    }

    fn report(
        &self,
        operation: Operation,
        product_id: ProductId,
        result: Result<Arc<Cart>, CartError>,
    ) -> Result<Arc<Cart>, CartError> {
        if let Err(error) = &result {
            tracing::warn!(
                operation = operation.as_str(),
                %product_id,
                kind = error.kind().as_str(),
                %error,
                "cart operation rejected"
            );
            let message = self.inner.config.messages.for_failure(operation, error);
            self.inner.notifier.error(message);
        }
        result
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.inner.config.storage_key)
            .field("items", &self.cart().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use cart_cache::MemoryStore;
    use cart_data::{StaticCatalog, StaticStock};

    fn product(id: i64) -> ProductMetadata {
        ProductMetadata::new(ProductId::new(id), format!("Tênis {id}"), 139.9, "img.jpg")
    }

    #[test]
    fn test_rehydrates_persisted_cart() {
        let persisted = Cart::new().with_added(product(1)).with_added(product(1));
        let storage = MemoryStore::with_entry(
            "@RocketShoes:cart",
            serde_json::to_string(&persisted).unwrap(),
        );

        let store = CartStore::builder(StaticCatalog::new(), StaticStock::new(), storage)
            .open()
            .unwrap();
        assert_eq!(*store.cart(), persisted);
    }

    #[test]
    fn test_unreadable_persisted_cart_starts_empty() {
        let storage = MemoryStore::with_entry("@RocketShoes:cart", "[{\"id\": \"x\"}");
        let store = CartStore::builder(StaticCatalog::new(), StaticStock::new(), storage)
            .open()
            .unwrap();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_custom_storage_key() {
        let store = CartStore::builder(StaticCatalog::new(), StaticStock::new(), MemoryStore::new())
            .with_config(StoreConfig::default().with_storage_key("cart:guest"))
            .open()
            .unwrap();
        assert_eq!(store.storage_key(), "cart:guest");
        assert_eq!(store.config().messages, crate::Messages::default());
    }

    #[tokio::test]
    async fn test_rejection_reports_one_message() {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CartStore::builder(StaticCatalog::new(), StaticStock::new(), MemoryStore::new())
            .with_notifier(Arc::clone(&notifier))
            .open()
            .unwrap();

        let result = store.remove_product(ProductId::new(3)).await;
        assert_eq!(result, Err(CartError::NotFound(ProductId::new(3))));
        assert_eq!(notifier.messages(), vec!["Erro na remoção do produto"]);
    }

    #[tokio::test]
    async fn test_catalog_id_mismatch_is_a_fetch_failure() {
        let store = CartStore::builder(
            MisroutedCatalog(product(2)),
            StaticStock::new().with_stock(ProductId::new(1), 5),
            MemoryStore::new(),
        )
        .open()
        .unwrap();

        let result = store.add_product(ProductId::new(1)).await;
        assert!(matches!(result, Err(CartError::Fetch(_))));
        assert!(store.cart().is_empty());
    }

    /// Serves the same product whatever id is asked for.
    struct MisroutedCatalog(ProductMetadata);

    #[async_trait::async_trait]
    impl ProductCatalog for MisroutedCatalog {
        async fn product(&self, _id: ProductId) -> Result<ProductMetadata, cart_data::FetchError> {
            Ok(self.0.clone())
        }
    }
}
