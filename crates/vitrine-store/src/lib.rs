//! Durable client-side storage and the persisted cart store for Vitrine.
//!
//! The storage layer is the native analogue of the browser's localStorage:
//! a flat string key-value store behind the [`Storage`] trait, with an
//! in-memory backend for tests and a file backend for real clients.
//! [`CartStore`] layers cart semantics on top: it restores a snapshot at
//! startup, persists after every mutation, and degrades to session-only
//! state when the backend fails.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use vitrine_commerce::prelude::*;
//! use vitrine_store::{CartStore, MemoryStorage};
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let mut store = CartStore::open(storage, Currency::NGN);
//!
//! let lamp = CartItem::new(
//!     ProductId::new("prod-7"),
//!     "Brass Lamp",
//!     Money::new(1800, Currency::NGN),
//!     "https://cdn.example.com/lamp.jpg",
//! ).unwrap();
//! store.add_item(lamp).unwrap();
//! assert_eq!(store.cart().item_count(), 1);
//! ```

mod error;
mod storage;
mod store;

pub use error::StoreError;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{CartStore, CART_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartStore, FileStorage, MemoryStorage, Storage, StoreError, CART_KEY};
}
