//! Cart line-items and the ordered cart sequence.
//!
//! A cart is an ordered sequence of line-items. Duplicates (the same
//! product id appearing twice) are permitted and represent two separately
//! added units; there is no quantity field. The sequence serializes as a
//! plain JSON array, which is also the durable on-device representation.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// One unit of a product added to the cart.
///
/// Structurally a full copy of the [`Product`], not a reference plus
/// quantity. Built field-for-field via `From<Product>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub image: String,
}

impl From<Product> for CartLineItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            image: product.image,
        }
    }
}

impl From<&Product> for CartLineItem {
    fn from(product: &Product) -> Self {
        product.clone().into()
    }
}

/// The ordered sequence of cart line-items.
///
/// Pure data with pure operations; persistence lives in the storefront's
/// cart store, which serializes this type as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a line-item at the end of the sequence.
    ///
    /// No uniqueness constraint: pushing the same product id twice yields
    /// two line-items.
    pub fn push(&mut self, item: CartLineItem) {
        self.items.push(item);
    }

    /// Remove every line-item whose id matches.
    ///
    /// All matching units are dropped at once; the relative order of the
    /// remaining items is preserved. A no-op when nothing matches, so the
    /// operation is idempotent.
    pub fn remove_all(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    /// Sum of all line-item prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }

    /// The line-items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serialize to the durable JSON-array representation.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from the durable JSON-array representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid line-item array.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FromIterator<CartLineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLineItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: u64, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: "d".to_string(),
            price: serde_json::from_str(&format!("\"{price}\"")).unwrap(),
            image: "u".to_string(),
        }
    }

    fn line(id: u64, price: &str) -> CartLineItem {
        product(id, price).into()
    }

    #[test]
    fn test_push_preserves_order() {
        let mut cart = Cart::new();
        cart.push(line(1, "1.00"));
        cart.push(line(2, "2.00"));
        cart.push(line(3, "3.00"));

        let ids: Vec<u64> = cart.items().iter().map(|i| i.id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicates_permitted() {
        let mut cart = Cart::new();
        cart.push(line(1, "1.00"));
        cart.push(line(1, "1.00"));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove_all_drops_every_matching_unit() {
        let mut cart = Cart::new();
        cart.push(line(1, "1.00"));
        cart.push(line(2, "2.00"));
        cart.push(line(1, "1.00"));
        cart.push(line(3, "3.00"));

        cart.remove_all(ProductId::new(1));

        let ids: Vec<u64> = cart.items().iter().map(|i| i.id.as_u64()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_remove_all_is_idempotent() {
        let mut cart = Cart::new();
        cart.push(line(1, "1.00"));
        cart.push(line(2, "2.00"));

        cart.remove_all(ProductId::new(1));
        let once = cart.clone();
        cart.remove_all(ProductId::new(1));
        assert_eq!(cart, once);
    }

    #[test]
    fn test_total_empty_is_zero() {
        assert_eq!(Cart::new().total(), Price::ZERO);
    }

    #[test]
    fn test_total_reorder_invariant() {
        let forward: Cart = [line(1, "1.10"), line(2, "2.20"), line(3, "3.30")]
            .into_iter()
            .collect();
        let backward: Cart = [line(3, "3.30"), line(2, "2.20"), line(1, "1.10")]
            .into_iter()
            .collect();
        assert_eq!(forward.total(), backward.total());
        assert_eq!(forward.total().to_string(), "6.60");
    }

    #[test]
    fn test_non_numeric_price_contributes_zero() {
        let json = r#"[
            {"id": 1, "title": "a", "price": "oops"},
            {"id": 2, "title": "b", "price": 2.50}
        ]"#;
        let cart = Cart::from_json(json).unwrap();
        assert_eq!(cart.total().to_string(), "2.50");
    }

    #[test]
    fn test_json_round_trip() {
        let cart: Cart = [line(1, "19.99"), line(1, "19.99"), line(7, "0.05")]
            .into_iter()
            .collect();
        let json = cart.to_json().unwrap();
        assert_eq!(Cart::from_json(&json).unwrap(), cart);
    }

    #[test]
    fn test_line_item_copies_product_field_for_field() {
        let p = product(9, "4.25");
        let item = CartLineItem::from(&p);
        assert_eq!(item.id, p.id);
        assert_eq!(item.title, p.title);
        assert_eq!(item.description, p.description);
        assert_eq!(item.price, p.price);
        assert_eq!(item.image, p.image);
    }
}
