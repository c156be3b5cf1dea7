//! Catalog-side types.
//!
//! These are owned by the external catalog and inventory services; the cart
//! only reads them.

mod product;
mod stock;

pub use product::ProductMetadata;
pub use stock::StockRecord;
