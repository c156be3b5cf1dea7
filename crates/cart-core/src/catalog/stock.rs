//! Stock records from the inventory service.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Quantity of a product available for purchase.
///
/// Fetched fresh for every stock-sensitive operation; never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockRecord {
    /// Product this record describes.
    pub id: ProductId,
    /// Units available.
    pub amount: i64,
}

impl StockRecord {
    /// Create a stock record.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Check if nothing is available.
    pub fn is_out_of_stock(&self) -> bool {
        self.amount <= 0
    }

    /// Check if a specific quantity can be held in the cart.
    pub fn covers(&self, requested: i64) -> bool {
        !self.is_out_of_stock() && self.amount >= requested
    }

    /// Check if one more unit can be added on top of `current`.
    ///
    /// Strictly greater: holding exactly the available amount leaves no room.
    pub fn allows_increment(&self, current: i64) -> bool {
        self.amount > current
    }
}
