//! Product metadata as served by the catalog.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as returned by the catalog.
///
/// The cart never interprets anything but `id`; the remaining attributes are
/// copied into the line item on first add and carried along for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductMetadata {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Unit price, opaque to the cart.
    #[serde(default)]
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Any further attributes the catalog returns.
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl ProductMetadata {
    /// Create product metadata with no extra attributes.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            attributes: serde_json::Map::new(),
        }
    }

    /// Attach an extra attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_catalog_payload() {
        let product: ProductMetadata = serde_json::from_value(json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/tenis1.jpg",
            "brand": "Rocket"
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, 179.9);
        assert_eq!(product.attributes.get("brand"), Some(&json!("Rocket")));
    }

    #[test]
    fn test_missing_display_fields_default() {
        let product: ProductMetadata = serde_json::from_value(json!({ "id": 9 })).unwrap();
        assert_eq!(product.title, "");
        assert!(product.attributes.is_empty());
    }
}
