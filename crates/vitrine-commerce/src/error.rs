//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in commerce operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A line item was constructed with a negative unit price.
    #[error("Invalid unit price: {0} minor units")]
    InvalidPrice(i64),

    /// An operation received a quantity it cannot represent.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch between a cart and an item, or between two amounts.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Required form fields are missing or blank.
    #[error("Missing required fields: {0}")]
    MissingFields(String),
}
