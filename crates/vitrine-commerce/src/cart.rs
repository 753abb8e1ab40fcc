//! Cart and line item types.
//!
//! The cart maintains a running total alongside its items. The total is
//! adjusted incrementally on every mutation and always equals the sum of
//! `unit_price * quantity` over the remaining items.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Line items are value snapshots of the product at add time: name, price
/// and image are denormalized for display and for the order payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Stable product identifier, unique within a cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price at add time.
    pub unit_price: Money,
    /// Quantity, >= 1 for any item held by a cart.
    pub quantity: i64,
    /// Product image URL (display only).
    pub image_url: String,
}

impl CartItem {
    /// Create a new line item with quantity 1.
    ///
    /// Returns an error if the unit price is negative.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image_url: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        if unit_price.is_negative() {
            return Err(CommerceError::InvalidPrice(unit_price.amount_minor));
        }
        Ok(Self {
            id,
            name: name.into(),
            unit_price,
            quantity: 1,
            image_url: image_url.into(),
        })
    }

    /// Total price for this line (`unit_price * quantity`).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart.
///
/// Items are kept in insertion order and are unique by product id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    total: Money,
    currency: Currency,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            total: Money::zero(currency),
            currency,
        }
    }

    /// Add one unit of a product to the cart.
    ///
    /// If an item with the same id already exists, its quantity is
    /// incremented by 1; otherwise the item is appended with quantity 1.
    /// Either way the total grows by one unit price. Repeated calls with
    /// the same product accumulate quantity on a single line.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CommerceError> {
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            // The line's own price drives the total, so the invariant holds
            // even if the catalog price changed since the first add.
            let unit_price = existing.unit_price;
            existing.quantity = existing
                .quantity
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;
            self.total = self
                .total
                .try_add(&unit_price)
                .ok_or(CommerceError::Overflow)?;
            return Ok(());
        }

        let mut item = item;
        item.quantity = 1;
        self.total = self
            .total
            .try_add(&item.unit_price)
            .ok_or(CommerceError::Overflow)?;
        self.items.push(item);
        Ok(())
    }

    /// Remove a line item by product id.
    ///
    /// Returns `false` (state unchanged) if no such item exists.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let Some(pos) = self.items.iter().position(|i| &i.id == id) else {
            return false;
        };
        let item = self.items.remove(pos);
        // line_total cannot overflow here: it was built by checked ops.
        let line_total = item
            .line_total()
            .unwrap_or_else(|_| Money::zero(self.currency));
        self.total = self
            .total
            .try_sub(&line_total)
            .unwrap_or_else(|| Money::zero(self.currency));
        true
    }

    /// Set the quantity of a line item.
    ///
    /// Returns `Ok(false)` (state unchanged) if no such item exists.
    /// The quantity is clamped to `max(0, quantity)`; setting it to 0
    /// removes the line item.
    pub fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        let quantity = quantity.max(0);
        if quantity == 0 {
            return Ok(self.remove_item(id));
        }

        let Some(item) = self.items.iter_mut().find(|i| &i.id == id) else {
            return Ok(false);
        };

        let old_total = item
            .unit_price
            .try_mul(item.quantity)
            .ok_or(CommerceError::Overflow)?;
        let new_total = item
            .unit_price
            .try_mul(quantity)
            .ok_or(CommerceError::Overflow)?;
        item.quantity = quantity;
        self.total = self
            .total
            .try_sub(&old_total)
            .and_then(|t| t.try_add(&new_total))
            .ok_or(CommerceError::Overflow)?;
        Ok(true)
    }

    /// Reset to the empty cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Money::zero(self.currency);
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct line items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Get a line item by product id.
    pub fn get_item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// The line items in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The running total.
    pub fn total(&self) -> Money {
        self.total
    }

    /// The cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Recompute the total from the items.
    ///
    /// Always equal to [`Cart::total`] for a cart mutated only through its
    /// operations; used to verify snapshots restored from storage.
    pub fn computed_total(&self) -> Result<Money, CommerceError> {
        let mut sum = Money::zero(self.currency);
        for item in &self.items {
            sum = sum
                .try_add(&item.line_total()?)
                .ok_or(CommerceError::Overflow)?;
        }
        Ok(sum)
    }

    /// Check that a cart (e.g., one restored from storage) is well formed:
    /// unique ids, positive quantities, non-negative prices, one currency,
    /// and a total consistent with the items.
    pub fn is_well_formed(&self) -> bool {
        for (idx, item) in self.items.iter().enumerate() {
            if item.quantity < 1
                || item.unit_price.is_negative()
                || item.unit_price.currency != self.currency
            {
                return false;
            }
            if self.items[..idx].iter().any(|other| other.id == item.id) {
                return false;
            }
        }
        match self.computed_total() {
            Ok(total) => total == self.total,
            Err(_) => false,
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}
