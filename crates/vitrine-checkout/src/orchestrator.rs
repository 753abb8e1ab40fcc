//! The checkout orchestrator.

use crate::api::{
    ApiError, CreateAddressRequest, CreateOrderRequest, CreateShipmentRequest, OrderItem,
    OrdersApi,
};
use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::flow::{CheckoutFlow, CheckoutStage};
use crate::payment::{PaymentGateway, PaymentOutcome, PaymentReference, PaymentRequest};
use chrono::{Duration, Utc};
use tracing::{debug, error, info, warn};
use vitrine_auth::SessionManager;
use vitrine_commerce::{OrderId, ShippingInfo};
use vitrine_store::CartStore;

/// A confirmed checkout.
#[derive(Debug, Clone)]
pub struct CheckoutConfirmation {
    /// The created order.
    pub order_id: OrderId,
    /// The completed flow, including the attempt snapshot and all ids.
    pub flow: CheckoutFlow,
}

impl CheckoutConfirmation {
    /// The route the UI navigates to after confirmation.
    pub fn confirmation_path(&self) -> String {
        format!("/order-confirmation/{}", self.order_id)
    }
}

/// Drives one checkout attempt end to end.
///
/// The orchestrator holds the two external ports and the static
/// configuration; cart store and session manager are passed per attempt.
/// Taking the cart store by `&mut` for the whole attempt means no other
/// consumer can mutate the cart while the attempt is in flight.
pub struct Orchestrator<A, G> {
    api: A,
    gateway: G,
    config: CheckoutConfig,
}

impl<A: OrdersApi, G: PaymentGateway> Orchestrator<A, G> {
    /// Create an orchestrator over an API client and payment gateway.
    pub fn new(api: A, gateway: G, config: CheckoutConfig) -> Self {
        Self {
            api,
            gateway,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Run one checkout attempt.
    ///
    /// Preconditions (authenticated session, non-empty cart, complete
    /// shipping form) are checked before anything external is invoked and
    /// fail with no side effects. After a successful payment the four
    /// remote writes run strictly in sequence, each gated on the previous
    /// step's id. The cart is cleared only after the final step succeeds;
    /// every failure path leaves it untouched so the attempt can be
    /// resubmitted from the still-populated form.
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        sessions: &mut SessionManager,
        shipping: &ShippingInfo,
    ) -> Result<CheckoutConfirmation, CheckoutError> {
        let (token, user_id) = {
            let session = sessions
                .require_session()
                .map_err(|_| CheckoutError::NotAuthenticated)?;
            (session.token.clone(), session.user_id.clone())
        };
        if cart.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        shipping.validate()?;

        // Snapshot: the attempt works off this even if the store were to
        // change underneath it.
        let items = cart.cart().items().to_vec();
        let total = cart.cart().total();
        let reference = PaymentReference::generate();
        let mut flow = CheckoutFlow::new(items.clone(), total, reference.clone());

        flow.advance(CheckoutStage::AwaitingPayment)?;
        debug!(reference = %reference, amount = total.amount_minor, "collecting payment");
        let outcome = self
            .gateway
            .collect(PaymentRequest {
                key: self.config.payment_public_key.clone(),
                email: shipping.email.clone(),
                amount: total.amount_minor,
                currency: self.config.currency,
                first_name: shipping.first_name.clone(),
                last_name: shipping.last_name.clone(),
                phone: shipping.phone.clone(),
                reference,
            })
            .await;
        let settled_reference = match outcome {
            PaymentOutcome::Success { reference } => reference,
            PaymentOutcome::Failed { message } => {
                warn!(message = %message, "payment failed");
                flow.fail(&message);
                return Err(CheckoutError::PaymentFailed { message });
            }
            PaymentOutcome::Closed => {
                debug!("payment window closed by payer");
                flow.fail("payment window closed");
                return Err(CheckoutError::PaymentClosed);
            }
        };

        let now = Utc::now();

        flow.advance(CheckoutStage::CreatingAddress)?;
        let address_request = CreateAddressRequest {
            user: user_id.clone(),
            street: shipping.address.clone(),
            city: shipping.city.clone(),
            state: shipping.state.clone(),
            country: self.config.country.clone(),
            zip_code: shipping.zip_code.clone(),
            phone_number: shipping.phone.clone(),
            is_default: false,
        };
        let address_id = match self.api.create_address(&token, &address_request).await {
            Ok(id) => id,
            Err(e) => return Err(remote_failure(flow, sessions, e)),
        };
        flow.attempt.address_id = Some(address_id.clone());

        flow.advance(CheckoutStage::CreatingOrder)?;
        let order_request = CreateOrderRequest {
            order_items: items
                .iter()
                .map(|item| OrderItem {
                    product: item.id.clone(),
                    quantity: item.quantity,
                    price: item.unit_price.to_decimal(),
                    name: item.name.clone(),
                })
                .collect(),
            total_amount: total.to_decimal(),
            payment_method: self.config.payment_method.clone(),
            status: "pending".to_string(),
            payment_reference: settled_reference,
            user: user_id.clone(),
            shipping_info: shipping.clone(),
        };
        let order_id = match self.api.create_order(&token, &order_request).await {
            Ok(id) => id,
            Err(e) => return Err(remote_failure(flow, sessions, e)),
        };
        flow.attempt.order_id = Some(order_id.clone());

        flow.advance(CheckoutStage::CreatingShipment)?;
        let shipment_request = CreateShipmentRequest {
            shipping_address: address_id,
            shipping_date: now,
            shipping_provider: self.config.shipping_provider.clone(),
            estimated_delivery_date: now + Duration::days(7),
            tracking_number: generate_tracking_number(),
            status: "pending".to_string(),
            user: user_id,
            order: order_id.clone(),
        };
        let shipment_id = match self.api.create_shipment(&token, &shipment_request).await {
            Ok(id) => id,
            Err(e) => return Err(remote_failure(flow, sessions, e)),
        };
        flow.attempt.shipment_id = Some(shipment_id.clone());

        flow.advance(CheckoutStage::AttachingShipment)?;
        if let Err(e) = self.api.attach_shipment(&token, &order_id, &shipment_id).await {
            return Err(remote_failure(flow, sessions, e));
        }

        flow.advance(CheckoutStage::Complete)?;
        cart.clear();
        info!(order = %order_id, "checkout complete");
        Ok(CheckoutConfirmation { order_id, flow })
    }
}

/// Convert a remote-step failure, forcing a logout when the server
/// rejected the token. Already-created records stay server-side; the
/// returned flow carries their ids.
fn remote_failure(
    mut flow: CheckoutFlow,
    sessions: &mut SessionManager,
    err: ApiError,
) -> CheckoutError {
    flow.fail(err.to_string());
    if err.is_unauthorized() {
        error!(stage = %flow.failed_at().unwrap_or(CheckoutStage::Failed), "token rejected; logging out");
        sessions.logout();
        CheckoutError::SessionExpired {
            flow: Box::new(flow),
        }
    } else {
        error!(
            stage = %flow.failed_at().unwrap_or(CheckoutStage::Failed),
            error = %err,
            "checkout step failed"
        );
        CheckoutError::Remote {
            flow: Box::new(flow),
            source: err,
        }
    }
}

/// Tracking numbers are client-generated, unique by timestamp.
fn generate_tracking_number() -> String {
    format!("TRACK-{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_number_format() {
        let tracking = generate_tracking_number();
        assert!(tracking.starts_with("TRACK-"));
        assert!(tracking["TRACK-".len()..].chars().all(|c| c.is_ascii_digit()));
    }
}
