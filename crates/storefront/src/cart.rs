//! Persistent shopping cart.
//!
//! The cart list is loaded from a [`KeyValueStore`] once when the store is
//! opened and written back in full after every mutation. The write happens
//! before subscribers are notified, so anything that observes the new list
//! can rely on storage already holding it.

use nxt_trendz_core::{CartEntry, CartList, CartSummary, Price, ProductId, ProductRecord};
use tokio::sync::watch;
use tracing::{debug, error, instrument, warn};

use crate::storage::KeyValueStore;

/// Default storage key for the serialized cart list.
pub const DEFAULT_CART_KEY: &str = "myCartList";

/// The shopping cart and its write-through persistence.
///
/// Every operation is total: unknown IDs are ignored and storage failures
/// are logged, never returned.
pub struct CartStore<K> {
    storage: K,
    key: String,
    list: watch::Sender<CartList>,
}

impl<K: KeyValueStore> CartStore<K> {
    /// Open the cart stored under `key`.
    ///
    /// A missing, unreadable or malformed value yields an empty cart.
    #[instrument(skip(storage))]
    pub fn open(storage: K, key: &str) -> Self {
        let list = load_list(&storage, key);
        debug!(entries = list.len(), "Cart loaded");

        Self {
            storage,
            key: key.to_string(),
            list: watch::Sender::new(list),
        }
    }

    /// Subscribe to cart changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartList> {
        self.list.subscribe()
    }

    /// A copy of the current list.
    #[must_use]
    pub fn snapshot(&self) -> CartList {
        self.list.borrow().clone()
    }

    /// Look up the entry for `id`.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<CartEntry> {
        self.list.borrow().get(id).cloned()
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.borrow().len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.borrow().is_empty()
    }

    /// Order total.
    #[must_use]
    pub fn total(&self) -> Price {
        self.list.borrow().total()
    }

    /// Order total and entry count.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.list.borrow().summary()
    }

    /// Add `product`, merging into an existing entry for the same ID.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&self, product: ProductRecord, requested: Option<u32>) {
        self.mutate(|list| list.add(product, requested));
    }

    /// Remove the entry for `id`, if present.
    #[instrument(skip(self))]
    pub fn remove_item(&self, id: ProductId) {
        self.mutate(|list| {
            list.remove(id);
        });
    }

    /// Add one to the quantity of `id`, if present.
    #[instrument(skip(self))]
    pub fn increment_quantity(&self, id: ProductId) {
        self.mutate(|list| {
            list.increment(id);
        });
    }

    /// Take one from the quantity of `id`; at one the entry is removed.
    #[instrument(skip(self))]
    pub fn decrement_quantity(&self, id: ProductId) {
        self.mutate(|list| {
            list.decrement(id);
        });
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_all(&self) {
        self.mutate(CartList::clear);
    }

    fn mutate(&self, apply: impl FnOnce(&mut CartList)) {
        self.list.send_modify(|list| {
            apply(list);
            self.persist(list);
        });
    }

    fn persist(&self, list: &CartList) {
        let serialized = match serde_json::to_string(list) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &serialized) {
            error!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}

fn load_list(storage: &impl KeyValueStore, key: &str) -> CartList {
    match storage.get(key) {
        Ok(Some(stored)) => serde_json::from_str(&stored).unwrap_or_else(|e| {
            warn!(error = %e, "Stored cart is malformed, starting empty");
            CartList::new()
        }),
        Ok(None) => CartList::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read stored cart, starting empty");
            CartList::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use nxt_trendz_core::Quantity;

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    fn product(id: i64, price: i64) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            brand: "Nxt".to_string(),
            description: "A product".to_string(),
            image_url: format!("https://assets.example.com/{id}.png"),
            price: Price::from_rupees(price),
            rating: 3.9,
            availability: "In Stock".to_string(),
            total_reviews: 120,
        }
    }

    fn stored(storage: &MemoryStore) -> CartList {
        serde_json::from_str(&storage.get(DEFAULT_CART_KEY).unwrap().unwrap()).unwrap()
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk unavailable").into())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk unavailable").into())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk unavailable").into())
        }
    }

    #[test]
    fn test_open_absent_is_empty() {
        let cart = CartStore::open(MemoryStore::new(), DEFAULT_CART_KEY);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_open_malformed_is_empty() {
        let storage = MemoryStore::with_value(DEFAULT_CART_KEY, "{not a list");
        let cart = CartStore::open(storage, DEFAULT_CART_KEY);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let storage = Arc::new(MemoryStore::new());
        let cart = CartStore::open(Arc::clone(&storage), DEFAULT_CART_KEY);

        cart.add_item(product(1, 100), Some(2));
        assert_eq!(stored(&storage), cart.snapshot());

        cart.increment_quantity(ProductId::new(1));
        assert_eq!(stored(&storage).get(ProductId::new(1)).unwrap().quantity.get(), 3);

        cart.decrement_quantity(ProductId::new(1));
        assert_eq!(stored(&storage).get(ProductId::new(1)).unwrap().quantity.get(), 2);

        cart.remove_item(ProductId::new(1));
        assert!(stored(&storage).is_empty());

        cart.add_item(product(2, 10), None);
        cart.clear_all();
        assert!(stored(&storage).is_empty());
    }

    #[test]
    fn test_reopen_restores_identical_list() {
        let storage = Arc::new(MemoryStore::new());
        let cart = CartStore::open(Arc::clone(&storage), DEFAULT_CART_KEY);
        cart.add_item(product(5, 50), Some(1));
        cart.add_item(product(2, 20), Some(4));
        cart.add_item(product(9, 90), Some(2));

        let reopened = CartStore::open(Arc::clone(&storage), DEFAULT_CART_KEY);
        assert_eq!(reopened.snapshot(), cart.snapshot());
    }

    #[test]
    fn test_worked_example() {
        let cart = CartStore::open(MemoryStore::new(), DEFAULT_CART_KEY);

        cart.add_item(product(1, 100), Some(2));
        assert_eq!(cart.total(), Price::from_rupees(200));
        assert_eq!(cart.len(), 1);

        cart.increment_quantity(ProductId::new(1));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity.get(), 3);
        assert_eq!(cart.total(), Price::from_rupees(300));

        for _ in 0..3 {
            cart.decrement_quantity(ProductId::new(1));
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_absent_ids_are_noops() {
        let cart = CartStore::open(MemoryStore::new(), DEFAULT_CART_KEY);
        cart.add_item(product(1, 100), Some(1));
        let before = cart.snapshot();

        cart.remove_item(ProductId::new(7));
        cart.increment_quantity(ProductId::new(7));
        cart.decrement_quantity(ProductId::new(7));
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_storage_failures_are_not_fatal() {
        let cart = CartStore::open(FailingStore, DEFAULT_CART_KEY);
        assert!(cart.is_empty());

        cart.add_item(product(1, 10), Some(1));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, Quantity::ONE);
    }

    #[test]
    fn test_subscribers_see_persisted_state() {
        let storage = Arc::new(MemoryStore::new());
        let cart = CartStore::open(Arc::clone(&storage), DEFAULT_CART_KEY);
        let mut updates = cart.subscribe();

        cart.add_item(product(1, 10), Some(2));

        assert!(updates.has_changed().unwrap());
        let seen = updates.borrow_and_update().clone();
        assert_eq!(seen, stored(&storage));
        assert_eq!(seen.len(), 1);
    }
}
