//! Order API port and error taxonomy.

mod http;
mod types;

pub use http::HttpOrdersApi;
pub use types::{
    AttachShipmentRequest, CreateAddressRequest, CreateOrderRequest, CreateShipmentRequest,
    CreatedRecord, Envelope, OrderItem, OrderRecord,
};

use async_trait::async_trait;
use thiserror::Error;
use vitrine_auth::SessionToken;
use vitrine_commerce::{AddressId, OrderId, ShipmentId};

/// Errors from the order API boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the bearer token (401, or an invalid-token
    /// message pattern).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The server answered with a non-success status.
    #[error("server returned {status}")]
    Remote {
        status: u16,
        /// Server-provided message, when the error body had one.
        message: Option<String>,
    },

    /// The request never completed (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// A success response did not match the documented shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// The server-provided message, if this failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } => Some(message),
            ApiError::Remote { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Check if this failure means the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// The remote order API, as the checkout sequence depends on it.
///
/// Every call carries the session's bearer token. Implementations must
/// not retry; the orchestrator treats each call as one attempt.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Create a shipping address record; returns its id.
    async fn create_address(
        &self,
        token: &SessionToken,
        request: &CreateAddressRequest,
    ) -> Result<AddressId, ApiError>;

    /// Create an order record; returns its id.
    async fn create_order(
        &self,
        token: &SessionToken,
        request: &CreateOrderRequest,
    ) -> Result<OrderId, ApiError>;

    /// Create a shipment record referencing an order; returns its id.
    async fn create_shipment(
        &self,
        token: &SessionToken,
        request: &CreateShipmentRequest,
    ) -> Result<ShipmentId, ApiError>;

    /// Attach a shipment to an existing order.
    async fn attach_shipment(
        &self,
        token: &SessionToken,
        order: &OrderId,
        shipment: &ShipmentId,
    ) -> Result<(), ApiError>;

    /// Fetch an order, e.g., for the confirmation view.
    async fn fetch_order(
        &self,
        token: &SessionToken,
        order: &OrderId,
    ) -> Result<OrderRecord, ApiError>;
}
