//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as supplied by the remote catalog.
///
/// Immutable once fetched: Minimart never edits catalog data, it only
/// copies it into cart line-items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Unit price. The catalog sends a number or a numeric string; a
    /// missing or unparseable value is coerced to zero.
    #[serde(default)]
    pub price: Price,
    /// URI of a displayable image resource.
    #[serde(default)]
    pub image: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_shape() {
        let json = r#"{
            "id": 1,
            "title": "Shirt",
            "description": "d",
            "price": 19.99,
            "image": "https://example.com/shirt.png"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title, "Shirt");
        assert_eq!(product.price.to_string(), "19.99");
    }

    #[test]
    fn test_deserialize_string_price() {
        let json = r#"{"id": 2, "title": "Mug", "price": "9.50"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.to_string(), "9.50");
        assert_eq!(product.description, "");
        assert_eq!(product.image, "");
    }

    #[test]
    fn test_missing_price_is_zero() {
        let json = r#"{"id": 3, "title": "Mystery"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Price::ZERO);
    }
}
