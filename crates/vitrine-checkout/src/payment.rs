//! Payment gateway port.
//!
//! The hosted payment widget is callback-driven; here it is modeled as
//! one awaitable operation returning a result variant, so the
//! orchestrator's dependency on the outcome is explicit and a fake gateway
//! can stand in during tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use vitrine_commerce::Currency;

/// A client-generated, globally unique reference for one payment attempt.
///
/// A fresh reference is generated per attempt; a retried checkout never
/// reuses one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentReference(String);

impl PaymentReference {
    /// Wrap an existing reference (e.g., one echoed back by the gateway).
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Generate a fresh reference from the clock and a random suffix.
    pub fn generate() -> Self {
        use rand::Rng;
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
        Self(format!("ORDER_{millis}_{suffix}"))
    }

    /// The reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Initialization data for the payment widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRequest {
    /// Gateway public key.
    pub key: String,
    /// Payer email.
    pub email: String,
    /// Amount in the currency's minor unit. The widget's wire contract
    /// requires integral minor-unit amounts.
    pub amount: i64,
    /// Payment currency.
    pub currency: Currency,
    /// Payer first name.
    pub first_name: String,
    /// Payer last name.
    pub last_name: String,
    /// Payer phone.
    pub phone: String,
    /// Unique reference for this attempt.
    pub reference: PaymentReference,
}

/// What the payment widget reported back.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Payment collected; the gateway echoes the reference it settled.
    Success { reference: PaymentReference },
    /// The gateway declined or errored.
    Failed { message: String },
    /// The payer closed the widget before completing.
    Closed,
}

/// An external payment collector.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Present the widget and suspend until it reports an outcome.
    async fn collect(&self, request: PaymentRequest) -> PaymentOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_format() {
        let reference = PaymentReference::generate();
        assert!(reference.as_str().starts_with("ORDER_"));
        assert_eq!(reference.as_str().split('_').count(), 3);
    }

    #[test]
    fn test_references_are_unique() {
        let a = PaymentReference::generate();
        let b = PaymentReference::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_reference_serializes_as_plain_string() {
        let reference = PaymentReference::new("ORDER_1_2");
        assert_eq!(
            serde_json::to_string(&reference).unwrap(),
            "\"ORDER_1_2\""
        );
    }
}
