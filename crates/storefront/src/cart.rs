//! Cart store: the single source of truth for cart contents.
//!
//! Every screen request loads its own store from durable storage and the
//! store persists synchronously after each mutation, so immediately after
//! `add` or `remove` returns the durable copy equals the in-memory copy.
//! There is no cross-request live subscription: a cart mutated by one
//! request is observed by another only when that one loads.

use std::sync::Arc;

use minimart_core::{Cart, CartLineItem, Price, Product, ProductId};
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};

/// The single durable key the cart lives under.
pub const CART_KEY: &str = "cart";

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart could not be serialized for persistence.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The durable write failed. The in-memory mutation has already been
    /// applied, so memory and durable state diverge until the next
    /// successful persist.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Authoritative cart state for one screen activation, with
/// synchronous-on-write durability against an injected store.
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    cart: Cart,
}

impl CartStore {
    /// Load the cart from durable storage.
    ///
    /// An absent value yields an empty cart. A read failure or a corrupt
    /// payload also yields an empty cart with a diagnostic warning; neither
    /// is fatal.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let cart = match storage.read(CART_KEY) {
            Ok(Some(json)) => Cart::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "corrupt cart payload, starting from an empty cart");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read cart, starting from an empty cart");
                Cart::new()
            }
        };

        Self { storage, cart }
    }

    /// Append a field-for-field copy of `product`, then persist.
    ///
    /// Returns once both the in-memory update and the durable write have
    /// completed. No uniqueness constraint: adding the same product twice
    /// yields two line-items.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if persisting fails; the in-memory append has
    /// already happened at that point.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        self.cart.push(product.into());
        self.persist()
    }

    /// Remove every line-item whose id equals `id`, then persist.
    ///
    /// All matching units are removed at once, not one per call. Idempotent
    /// when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if persisting fails; the in-memory removal has
    /// already happened at that point.
    pub fn remove(&mut self, id: ProductId) -> Result<(), CartError> {
        self.cart.remove_all(id);
        self.persist()
    }

    /// The line-items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// Sum of all line-item prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    // In-memory update always precedes the durable write; callers must not
    // assume durability before add/remove returns.
    fn persist(&self) -> Result<(), CartError> {
        let json = self.cart.to_json()?;
        self.storage.write(CART_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn product(id: u64, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: "d".to_string(),
            price: serde_json::from_str(&format!("\"{price}\"")).unwrap(),
            image: "u".to_string(),
        }
    }

    fn durable_cart(storage: &Arc<MemoryStore>) -> Cart {
        let json = storage.read(CART_KEY).unwrap().unwrap();
        Cart::from_json(&json).unwrap()
    }

    #[test]
    fn test_load_absent_value_is_empty() {
        let storage = Arc::new(MemoryStore::new());
        let store = CartStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_persists_immediately() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = CartStore::load(storage.clone());

        store.add(&product(1, "19.99")).unwrap();

        let durable = durable_cart(&storage);
        assert_eq!(durable.items(), store.items());
        assert_eq!(durable.len(), 1);
    }

    #[test]
    fn test_adds_preserve_order_in_memory_and_durably() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = CartStore::load(storage.clone());

        for id in [1, 2, 3] {
            store.add(&product(id, "1.00")).unwrap();
        }

        let ids: Vec<u64> = store.items().iter().map(|i| i.id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(durable_cart(&storage).items(), store.items());
    }

    #[test]
    fn test_remove_drops_all_matching_units_and_persists() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = CartStore::load(storage.clone());

        store.add(&product(1, "19.99")).unwrap();
        store.add(&product(2, "5.00")).unwrap();
        store.add(&product(1, "19.99")).unwrap();

        store.remove(ProductId::new(1)).unwrap();

        let ids: Vec<u64> = store.items().iter().map(|i| i.id.as_u64()).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(durable_cart(&storage).items(), store.items());
    }

    #[test]
    fn test_reload_observes_previous_mutations() {
        let storage = Arc::new(MemoryStore::new());
        let shared: Arc<dyn KeyValueStore> = storage.clone();

        let mut store = CartStore::load(Arc::clone(&shared));
        store.add(&product(1, "19.99")).unwrap();

        // A fresh activation sees the durable state.
        let reloaded = CartStore::load(shared);
        assert_eq!(reloaded.items(), store.items());
        assert_eq!(reloaded.total().to_string(), "19.99");
    }

    #[test]
    fn test_load_corrupt_payload_falls_back_to_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.write(CART_KEY, "{not json").unwrap();

        let store = CartStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        struct ReadOnlyStore;
        impl KeyValueStore for ReadOnlyStore {
            fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }
            fn write(&self, key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Write {
                    key: key.to_string(),
                    source: std::io::Error::other("disk full"),
                })
            }
        }

        let mut store = CartStore::load(Arc::new(ReadOnlyStore));
        let result = store.add(&product(1, "19.99"));

        assert!(result.is_err());
        // The in-memory append happened before the failed write.
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_total_of_empty_cart_is_zero() {
        let store = CartStore::load(Arc::new(MemoryStore::new()));
        assert_eq!(store.total(), Price::ZERO);
        assert_eq!(store.total().to_string(), "0.00");
    }
}
