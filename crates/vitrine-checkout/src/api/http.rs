//! Reqwest-backed implementation of the order API port.

use crate::api::types::{
    AttachShipmentRequest, CreateAddressRequest, CreateOrderRequest, CreateShipmentRequest,
    CreatedRecord, Envelope, ErrorBody, OrderRecord,
};
use crate::api::{ApiError, OrdersApi};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use vitrine_auth::SessionToken;
use vitrine_commerce::{AddressId, OrderId, ShipmentId};

/// HTTP client for the order API.
pub struct HttpOrdersApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrdersApi {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and decode the `{ "data": ... }` envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute_raw(request).await?;
        serde_json::from_str::<Envelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Send a request, check the status, and return the raw body.
    async fn execute_raw(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(classify_error(status, message));
        }
        Ok(body)
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    async fn create_address(
        &self,
        token: &SessionToken,
        request: &CreateAddressRequest,
    ) -> Result<AddressId, ApiError> {
        let record: CreatedRecord = self
            .execute(
                self.client
                    .post(self.url("/api/addresses"))
                    .bearer_auth(token.as_str())
                    .json(request),
            )
            .await?;
        Ok(AddressId::new(record.id))
    }

    async fn create_order(
        &self,
        token: &SessionToken,
        request: &CreateOrderRequest,
    ) -> Result<OrderId, ApiError> {
        let record: CreatedRecord = self
            .execute(
                self.client
                    .post(self.url("/api/orders"))
                    .bearer_auth(token.as_str())
                    .json(request),
            )
            .await?;
        Ok(OrderId::new(record.id))
    }

    async fn create_shipment(
        &self,
        token: &SessionToken,
        request: &CreateShipmentRequest,
    ) -> Result<ShipmentId, ApiError> {
        let record: CreatedRecord = self
            .execute(
                self.client
                    .post(self.url("/api/shipments"))
                    .bearer_auth(token.as_str())
                    .json(request),
            )
            .await?;
        Ok(ShipmentId::new(record.id))
    }

    async fn attach_shipment(
        &self,
        token: &SessionToken,
        order: &OrderId,
        shipment: &ShipmentId,
    ) -> Result<(), ApiError> {
        // Success is all that matters here; the patch response body is
        // not part of the contract.
        self.execute_raw(
            self.client
                .patch(self.url(&format!("/api/orders/{order}")))
                .bearer_auth(token.as_str())
                .json(&AttachShipmentRequest {
                    shipment: shipment.clone(),
                }),
        )
        .await?;
        Ok(())
    }

    async fn fetch_order(
        &self,
        token: &SessionToken,
        order: &OrderId,
    ) -> Result<OrderRecord, ApiError> {
        self.execute(
            self.client
                .get(self.url(&format!("/api/orders/{order}")))
                .bearer_auth(token.as_str()),
        )
        .await
    }
}

/// Map a non-success response to an error.
///
/// A 401, or a message matching the server's invalid-token phrasing on any
/// status, means the session is no longer valid.
fn classify_error(status: u16, message: Option<String>) -> ApiError {
    let is_auth = status == 401 || message.as_deref().is_some_and(is_auth_message);
    if is_auth {
        ApiError::Unauthorized {
            message: message.unwrap_or_else(|| "invalid token".to_string()),
        }
    } else {
        ApiError::Remote { status, message }
    }
}

fn is_auth_message(message: &str) -> bool {
    message.contains("Invalid token") || message.contains("Authentication token is required")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        let api = HttpOrdersApi::new("http://localhost:5050/");
        assert_eq!(api.url("/api/orders"), "http://localhost:5050/api/orders");
    }

    #[test]
    fn test_classify_401_as_unauthorized() {
        let err = classify_error(401, None);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_classify_invalid_token_message_as_unauthorized() {
        let err = classify_error(400, Some("Invalid token".to_string()));
        assert!(err.is_unauthorized());

        let err = classify_error(403, Some("Authentication token is required".to_string()));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_classify_other_failures_as_remote() {
        let err = classify_error(422, Some("Order validation failed".to_string()));
        assert!(!err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Order validation failed"));

        let err = classify_error(500, None);
        assert!(matches!(err, ApiError::Remote { status: 500, .. }));
    }
}
