//! Checkout orchestration for Vitrine.
//!
//! Drives a single checkout attempt from "user submits the shipping form"
//! to "order confirmed or error shown": one external payment collection
//! through the [`PaymentGateway`] port, then four strictly sequential
//! remote writes through the [`OrdersApi`] port (address → order →
//! shipment → order patch), then clearing the cart store.
//!
//! Every failure is caught at the orchestrator boundary and converted to
//! a [`CheckoutError`] with a user-visible message; an expired session
//! detected mid-sequence forces a logout through the session manager.

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod orchestrator;
pub mod payment;

pub use api::{ApiError, HttpOrdersApi, OrdersApi};
pub use config::CheckoutConfig;
pub use error::CheckoutError;
pub use flow::{CheckoutAttempt, CheckoutFlow, CheckoutStage};
pub use orchestrator::{CheckoutConfirmation, Orchestrator};
pub use payment::{PaymentGateway, PaymentOutcome, PaymentReference, PaymentRequest};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{
        ApiError, CreateAddressRequest, CreateOrderRequest, CreateShipmentRequest,
        HttpOrdersApi, OrderItem, OrderRecord, OrdersApi,
    };
    pub use crate::config::CheckoutConfig;
    pub use crate::error::CheckoutError;
    pub use crate::flow::{CheckoutAttempt, CheckoutFlow, CheckoutStage};
    pub use crate::orchestrator::{CheckoutConfirmation, Orchestrator};
    pub use crate::payment::{PaymentGateway, PaymentOutcome, PaymentReference, PaymentRequest};
}
