//! Stock-checked, persisted shopping cart for RocketCart.
//!
//! [`CartStore`] is the single owner of the cart. UI code holds a cloned
//! handle, reads snapshots with [`CartStore::cart`] or follows them with
//! [`CartStore::subscribe`], and changes the cart only through the three
//! operations:
//!
//! - [`CartStore::add_product`]
//! - [`CartStore::remove_product`]
//! - [`CartStore::update_product_amount`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_cache::FileStore;
//! use cart_data::{Resilient, StaticCatalog, StaticStock};
//! use cart_store::prelude::*;
//!
//! let store = CartStore::builder(
//!     Resilient::new(catalog),
//!     Resilient::new(stock),
//!     FileStore::open("cart.json")?,
//! )
//! .open()?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! store
//!     .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3))
//!     .await?;
//! ```

mod config;
mod messages;
mod notify;
mod store;

pub use config::{StoreConfig, DEFAULT_STORAGE_KEY};
pub use messages::{Messages, Operation};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use store::{CartStore, CartStoreBuilder, UpdateProductAmount};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartStore, Messages, Notifier, StoreConfig, TracingNotifier, UpdateProductAmount,
    };
    pub use cart_core::prelude::*;
}
