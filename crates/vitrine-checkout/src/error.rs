//! Checkout error taxonomy.
//!
//! Everything that can go wrong in an attempt is caught at the
//! orchestrator boundary and lands here; `user_message` is the single
//! user-visible string the UI shows.

use crate::api::ApiError;
use crate::flow::{CheckoutFlow, CheckoutStage};
use thiserror::Error;

/// Errors from a checkout attempt.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// No session; checked before any external call.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Empty cart; checked before any external call.
    #[error("cart is empty")]
    EmptyCart,

    /// Shipping form incomplete; checked before any external call.
    #[error("invalid shipping info: {0}")]
    Validation(#[from] vitrine_commerce::CommerceError),

    /// The payment gateway reported a failed payment. No remote writes
    /// were made.
    #[error("payment failed: {message}")]
    PaymentFailed { message: String },

    /// The payer closed the payment widget. No remote writes were made.
    #[error("payment window closed")]
    PaymentClosed,

    /// The server rejected the session token during a remote write. The
    /// session has been cleared; the flow records which records were
    /// created before the rejection.
    #[error("session expired during {}", .flow.failed_at().unwrap_or(CheckoutStage::Failed))]
    SessionExpired { flow: Box<CheckoutFlow> },

    /// A remote write failed. Already-created records are left in place;
    /// the flow records which ids exist server-side.
    #[error("checkout step {} failed: {source}", .flow.failed_at().unwrap_or(CheckoutStage::Failed))]
    Remote {
        flow: Box<CheckoutFlow>,
        #[source]
        source: ApiError,
    },

    /// Stage machine misuse; a bug in the caller, not a user condition.
    #[error("invalid checkout transition from {from} to {to}")]
    InvalidTransition {
        from: CheckoutStage,
        to: CheckoutStage,
    },
}

impl CheckoutError {
    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::NotAuthenticated => {
                "Please login to complete your order".to_string()
            }
            CheckoutError::EmptyCart => {
                "Your cart is empty. Please add items before checkout.".to_string()
            }
            CheckoutError::Validation(e) => e.to_string(),
            CheckoutError::PaymentFailed { .. } => "Payment was not successful".to_string(),
            CheckoutError::PaymentClosed => {
                "Payment was cancelled before completion.".to_string()
            }
            CheckoutError::SessionExpired { .. } => {
                "Your session has expired. Please log in again.".to_string()
            }
            CheckoutError::Remote { source, .. } => source
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| {
                    "Failed to create order. Please contact support.".to_string()
                }),
            CheckoutError::InvalidTransition { .. } => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    /// Check if re-authentication would resolve this failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            CheckoutError::NotAuthenticated | CheckoutError::SessionExpired { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expired_message_is_exact() {
        let flow = CheckoutFlow::new(
            Vec::new(),
            vitrine_commerce::Money::zero(vitrine_commerce::Currency::NGN),
            crate::payment::PaymentReference::new("ORDER_1_1"),
        );
        let err = CheckoutError::SessionExpired {
            flow: Box::new(flow),
        };
        assert_eq!(
            err.user_message(),
            "Your session has expired. Please log in again."
        );
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_remote_error_prefers_server_message() {
        let mut flow = CheckoutFlow::new(
            Vec::new(),
            vitrine_commerce::Money::zero(vitrine_commerce::Currency::NGN),
            crate::payment::PaymentReference::new("ORDER_1_1"),
        );
        flow.fail("boom");

        let with_message = CheckoutError::Remote {
            flow: Box::new(flow.clone()),
            source: ApiError::Remote {
                status: 422,
                message: Some("Order validation failed".to_string()),
            },
        };
        assert_eq!(with_message.user_message(), "Order validation failed");

        let without_message = CheckoutError::Remote {
            flow: Box::new(flow),
            source: ApiError::Network("connection refused".to_string()),
        };
        assert_eq!(
            without_message.user_message(),
            "Failed to create order. Please contact support."
        );
    }
}
