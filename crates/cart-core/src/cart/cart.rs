//! The cart value.

use crate::cart::LineItem;
use crate::catalog::ProductMetadata;
use crate::error::CartError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// A shopping cart: an ordered sequence of line items with unique ids.
///
/// Carts are values. Every transition returns a new `Cart` and leaves the
/// receiver untouched, so a snapshot handed to a reader never changes under
/// it. Order is insertion order and only matters for display.
///
/// On the wire a cart is a JSON array of line items. Decoding rejects
/// duplicate ids and amounts below 1.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items, validating the cart invariants.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(CartError::Serialization(format!(
                    "duplicate product {} in cart",
                    item.id()
                )));
            }
            if item.amount < 1 {
                return Err(CartError::InvalidAmount(item.amount));
            }
        }
        Ok(Self { items })
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Product ids in insertion order.
    pub fn ids(&self) -> Vec<ProductId> {
        self.items.iter().map(LineItem::id).collect()
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all line items, saturating at `i64::MAX`.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.amount))
    }

    /// Get the line item for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Quantity held for a product, if present.
    pub fn amount_of(&self, product_id: ProductId) -> Option<i64> {
        self.get(product_id).map(|i| i.amount)
    }

    /// Cart with one unit of `product` added.
    ///
    /// Appends a new line item, or bumps the existing line for the same id
    /// so ids stay unique.
    pub fn with_added(&self, product: ProductMetadata) -> Cart {
        let product_id = product.id;
        if self.contains(product_id) {
            return self.map_item(product_id, |item| item.amount = item.amount.saturating_add(1));
        }

        let mut items = self.items.clone();
        items.push(LineItem::new(product));
        Cart { items }
    }

    /// Cart with the line for `product_id` incremented by one.
    pub fn with_incremented(&self, product_id: ProductId) -> Result<Cart, CartError> {
        if !self.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }
        Ok(self.map_item(product_id, |item| item.amount = item.amount.saturating_add(1)))
    }

    /// Cart with the line for `product_id` set to `amount`.
    ///
    /// Other lines and their order are preserved.
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> Result<Cart, CartError> {
        if amount <= 0 {
            return Err(CartError::InvalidAmount(amount));
        }
        if !self.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }
        Ok(self.map_item(product_id, |item| item.amount = amount))
    }

    /// Cart without the line for `product_id`.
    pub fn without(&self, product_id: ProductId) -> Result<Cart, CartError> {
        if !self.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }
        let items = self
            .items
            .iter()
            .filter(|i| i.id() != product_id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }

    fn map_item(&self, product_id: ProductId, f: impl FnOnce(&mut LineItem)) -> Cart {
        let mut items = self.items.clone();
        if let Some(item) = items.iter_mut().find(|i| i.id() == product_id) {
            f(item);
        }
        Cart { items }
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
