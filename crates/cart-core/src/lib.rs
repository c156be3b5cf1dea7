//! Cart domain types for RocketCart.
//!
//! This crate holds the pure, I/O-free part of the cart:
//!
//! - **Catalog**: product metadata and stock records as returned by the
//!   external catalog and inventory services
//! - **Cart**: line items and the immutable cart value with its transitions
//! - **Errors**: the failure taxonomy shared by every cart operation
//!
//! # Example
//!
//! ```rust
//! use cart_core::prelude::*;
//!
//! let sneaker = ProductMetadata::new(ProductId::new(1), "Tênis de Caminhada", 179.9, "tenis.jpg");
//!
//! let cart = Cart::new().with_added(sneaker);
//! let cart = cart.with_incremented(ProductId::new(1)).unwrap();
//!
//! assert_eq!(cart.amount_of(ProductId::new(1)), Some(2));
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;

pub use error::{CartError, ErrorKind};
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, ErrorKind};
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{ProductMetadata, StockRecord};

    // Cart
    pub use crate::cart::{Cart, LineItem};
}
