//! The persisted cart store.

use crate::Storage;
use std::sync::Arc;
use tracing::{debug, warn};
use vitrine_commerce::{Cart, CartItem, CommerceError, Currency, ProductId};

/// Storage key for the cart snapshot.
pub const CART_KEY: &str = "cart";

/// Single source of truth for the shopping cart.
///
/// The store restores the persisted snapshot when opened and persists after
/// every mutation. Storage failures never fail a mutation: the in-memory
/// cart stays authoritative for the session and the failure is logged.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn Storage>,
}

impl CartStore {
    /// Open the store, restoring the persisted cart if one exists.
    ///
    /// A missing, unreadable, or malformed snapshot falls back to the
    /// empty cart. A snapshot whose total does not match its items is
    /// treated as malformed.
    pub fn open(storage: Arc<dyn Storage>, currency: Currency) -> Self {
        let cart = match storage.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Cart>(&raw) {
                Ok(cart) if cart.is_well_formed() && cart.currency() == currency => {
                    debug!(items = cart.unique_item_count(), "restored cart snapshot");
                    cart
                }
                Ok(_) => {
                    warn!("discarding inconsistent cart snapshot");
                    Cart::new(currency)
                }
                Err(e) => {
                    warn!(error = %e, "discarding malformed cart snapshot");
                    Cart::new(currency)
                }
            },
            Ok(None) => Cart::new(currency),
            Err(e) => {
                warn!(error = %e, "failed to read cart snapshot");
                Cart::new(currency)
            }
        };
        Self { cart, storage }
    }

    /// The current cart snapshot.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a product, then persist.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CommerceError> {
        self.cart.add_item(item)?;
        self.persist();
        Ok(())
    }

    /// Remove a line item, then persist. No-op on an unknown id.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove_item(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Set a line item's quantity, then persist. No-op on an unknown id.
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        let changed = self.cart.update_quantity(id, quantity)?;
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    /// Reset to the empty cart, then persist.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    fn persist(&self) {
        let snapshot = match serde_json::to_string(&self.cart) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to encode cart snapshot");
                return;
            }
        };
        if let Err(e) = self.storage.set(CART_KEY, &snapshot) {
            warn!(error = %e, "failed to persist cart; keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStorage, StoreError};
    use vitrine_commerce::Money;

    fn item(id: &str, price_minor: i64) -> CartItem {
        CartItem::new(
            ProductId::new(id),
            format!("Product {id}"),
            Money::new(price_minor, Currency::NGN),
            format!("https://cdn.example.com/{id}.jpg"),
        )
        .unwrap()
    }

    /// Storage whose writes always fail; reads succeed.
    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }
    }

    #[test]
    fn test_open_without_snapshot_starts_empty() {
        let store = CartStore::open(Arc::new(MemoryStorage::new()), Currency::NGN);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_roundtrip_through_storage() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = CartStore::open(storage.clone(), Currency::NGN);
            store.add_item(item("p1", 1000)).unwrap();
            store.add_item(item("p1", 1000)).unwrap();
            store.add_item(item("p2", 250)).unwrap();
        }

        let restored = CartStore::open(storage, Currency::NGN);
        assert_eq!(restored.cart().unique_item_count(), 2);
        assert_eq!(restored.cart().item_count(), 3);
        assert_eq!(restored.cart().total().amount_minor, 2250);
        assert_eq!(
            restored.cart().total(),
            restored.cart().computed_total().unwrap()
        );
    }

    #[test]
    fn test_empty_cart_roundtrips() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = CartStore::open(storage.clone(), Currency::NGN);
            store.add_item(item("p1", 1000)).unwrap();
            store.clear();
        }
        let restored = CartStore::open(storage, Currency::NGN);
        assert!(restored.cart().is_empty());
        assert!(restored.cart().total().is_zero());
    }

    #[test]
    fn test_malformed_snapshot_falls_back_to_empty() {
        let storage = Arc::new(MemoryStorage::with_entry(CART_KEY, "not json at all"));
        let store = CartStore::open(storage, Currency::NGN);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_inconsistent_snapshot_falls_back_to_empty() {
        let mut cart = Cart::new(Currency::NGN);
        cart.add_item(item("p1", 500)).unwrap();
        let mut value = serde_json::to_value(&cart).unwrap();
        value["total"]["amount_minor"] = serde_json::json!(123456);

        let storage = Arc::new(MemoryStorage::with_entry(CART_KEY, value.to_string()));
        let store = CartStore::open(storage, Currency::NGN);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_save_failure_keeps_in_memory_state() {
        let mut store = CartStore::open(Arc::new(FailingStorage), Currency::NGN);
        store.add_item(item("p1", 1000)).unwrap();
        assert_eq!(store.cart().item_count(), 1);
        assert_eq!(store.cart().total().amount_minor, 1000);

        store.clear();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_mutations_persist_immediately() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::open(storage.clone(), Currency::NGN);
        store.add_item(item("p1", 1000)).unwrap();

        let raw = storage.get(CART_KEY).unwrap().unwrap();
        let persisted: Cart = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.item_count(), 1);

        store.update_quantity(&ProductId::new("p1"), 4).unwrap();
        let raw = storage.get(CART_KEY).unwrap().unwrap();
        let persisted: Cart = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.total().amount_minor, 4000);
    }
}
