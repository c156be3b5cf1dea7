//! Line items.

use crate::catalog::ProductMetadata;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One product entry in the cart with its quantity.
///
/// Serialized flat, product attributes alongside `amount`:
/// `{"id":1,"title":"…","price":179.9,"image":"…","amount":2}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product attributes copied from the catalog on first add.
    #[serde(flatten)]
    pub product: ProductMetadata,
    /// Quantity in the cart, at least 1.
    pub amount: i64,
}

impl LineItem {
    /// Create a line item holding a single unit of `product`.
    pub fn new(product: ProductMetadata) -> Self {
        Self { product, amount: 1 }
    }

    /// Create a line item with an explicit quantity.
    pub fn with_amount(product: ProductMetadata, amount: i64) -> Self {
        Self { product, amount }
    }

    /// Product identity of this line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_line_item_holds_one_unit() {
        let item = LineItem::new(ProductMetadata::new(ProductId::new(1), "Tênis", 139.9, "a.jpg"));
        assert_eq!(item.amount, 1);
        assert_eq!(item.id(), ProductId::new(1));
    }

    #[test]
    fn test_serializes_flat() {
        let item = LineItem::with_amount(
            ProductMetadata::new(ProductId::new(3), "Tênis Adidas", 219.9, "b.jpg"),
            2,
        );

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "title": "Tênis Adidas",
                "price": 219.9,
                "image": "b.jpg",
                "amount": 2
            })
        );
    }

    #[test]
    fn test_extra_attributes_survive_round_trip() {
        let raw = json!({
            "id": 4,
            "title": "Tênis VR",
            "price": 99.9,
            "image": "c.jpg",
            "color": "blue",
            "amount": 1
        });

        let item: LineItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.product.attributes.get("color"), Some(&json!("blue")));
        assert!(!item.product.attributes.contains_key("amount"));
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }
}
