//! Key-value persistence for RocketCart.
//!
//! The cart is mirrored to a string key-value store after every mutation.
//! This crate provides the store seam and its backends:
//!
//! - [`KeyValueStore`] - synchronous get/set/delete of strings
//! - [`MemoryStore`] - in-process, for tests and ephemeral sessions
//! - [`FileStore`] - a JSON file, so carts survive restarts
//! - [`Cache`] - typed JSON wrapper over any store
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_cache::{Cache, FileStore};
//! use std::sync::Arc;
//!
//! let cache = Cache::new(Arc::new(FileStore::open("cart.json")?));
//!
//! // Store a value
//! cache.set("@RocketShoes:cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = cache.get("@RocketShoes:cart")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;
mod store;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::Cache;
pub use memory::MemoryStore;
pub use store::KeyValueStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
