//! Shopping cart module.
//!
//! Contains the line item type and the immutable cart value.

mod cart;
mod line_item;

pub use cart::Cart;
pub use line_item::LineItem;
