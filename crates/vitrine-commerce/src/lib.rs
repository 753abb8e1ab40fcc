//! Commerce domain types and cart logic for Vitrine.
//!
//! This crate provides the client-side commerce model for the storefront:
//!
//! - **Money**: minor-unit integer amounts with currency
//! - **Cart**: shopping cart with line items and a running total
//! - **Shipping**: checkout shipping form data
//!
//! # Example
//!
//! ```rust
//! use vitrine_commerce::prelude::*;
//!
//! let mut cart = Cart::new(Currency::NGN);
//! let chair = CartItem::new(
//!     ProductId::new("prod-1"),
//!     "Walnut Chair",
//!     Money::new(2500, Currency::NGN),
//!     "https://cdn.example.com/chair.jpg",
//! ).unwrap();
//!
//! cart.add_item(chair.clone()).unwrap();
//! cart.add_item(chair).unwrap();
//! assert_eq!(cart.total().amount_minor, 5000);
//! ```

pub mod cart;
pub mod error;
pub mod ids;
pub mod money;
pub mod shipping;

pub use cart::{Cart, CartItem};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use shipping::ShippingInfo;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartItem};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::shipping::ShippingInfo;
}
