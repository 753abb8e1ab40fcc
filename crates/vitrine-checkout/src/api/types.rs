//! Wire contracts for the order API.
//!
//! Field names follow the server's camelCase shape; created records come
//! back wrapped in a `{ "data": ... }` envelope with Mongo-style `_id`
//! fields. Responses are decoded into these types at the boundary so a
//! shape mismatch fails fast as a typed error instead of surfacing as a
//! missing field deep in the orchestrator.

use crate::payment::PaymentReference;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitrine_commerce::{AddressId, OrderId, ProductId, ShipmentId, ShippingInfo, UserId};

/// `POST /api/addresses` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub user: UserId,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
    pub phone_number: String,
    pub is_default: bool,
}

/// One line of an order payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product: ProductId,
    pub quantity: i64,
    /// Unit price in decimal currency units, per the server contract.
    pub price: f64,
    pub name: String,
}

/// `POST /api/orders` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_items: Vec<OrderItem>,
    /// Order total in decimal currency units.
    pub total_amount: f64,
    pub payment_method: String,
    pub status: String,
    pub payment_reference: PaymentReference,
    pub user: UserId,
    pub shipping_info: ShippingInfo,
}

/// `POST /api/shipments` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    pub shipping_address: AddressId,
    pub shipping_date: DateTime<Utc>,
    pub shipping_provider: String,
    pub estimated_delivery_date: DateTime<Utc>,
    pub tracking_number: String,
    pub status: String,
    pub user: UserId,
    pub order: OrderId,
}

/// `PATCH /api/orders/{id}` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttachShipmentRequest {
    pub shipment: ShipmentId,
}

/// The `{ "data": ... }` wrapper on every successful response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
}

/// A freshly created record; only the id matters to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedRecord {
    #[serde(rename = "_id")]
    pub id: String,
}

/// An order as returned by `GET /api/orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub total_amount: f64,
    pub status: String,
    #[serde(default)]
    pub payment_reference: Option<PaymentReference>,
    #[serde(default)]
    pub shipment: Option<ShipmentId>,
}

/// Error body the server sends on failures.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_address_request_field_names() {
        let req = CreateAddressRequest {
            user: UserId::new("user-1"),
            street: "14 Marina Rd".into(),
            city: "Lagos".into(),
            state: "Lagos".into(),
            country: "Nigeria".into(),
            zip_code: "101001".into(),
            phone_number: "+2348012345678".into(),
            is_default: false,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["zipCode"], "101001");
        assert_eq!(json["phoneNumber"], "+2348012345678");
        assert_eq!(json["isDefault"], false);
    }

    #[test]
    fn test_order_request_field_names() {
        let req = CreateOrderRequest {
            order_items: vec![OrderItem {
                product: ProductId::new("p1"),
                quantity: 2,
                price: 25.0,
                name: "Walnut Chair".into(),
            }],
            total_amount: 50.0,
            payment_method: "paystack".into(),
            status: "pending".into(),
            payment_reference: PaymentReference::new("ORDER_1_2"),
            user: UserId::new("user-1"),
            shipping_info: ShippingInfo::default(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["orderItems"][0]["product"], "p1");
        assert_eq!(json["totalAmount"], 50.0);
        assert_eq!(json["paymentReference"], "ORDER_1_2");
        assert!(json["shippingInfo"].get("firstName").is_some());
    }

    #[test]
    fn test_shipment_request_field_names() {
        let date = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let req = CreateShipmentRequest {
            shipping_address: AddressId::new("addr-1"),
            shipping_date: date,
            shipping_provider: "Standard Shipping".into(),
            estimated_delivery_date: date + chrono::Duration::days(7),
            tracking_number: "TRACK-1".into(),
            status: "pending".into(),
            user: UserId::new("user-1"),
            order: OrderId::new("ord-1"),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["shippingAddress"], "addr-1");
        assert_eq!(json["order"], "ord-1");
        assert_eq!(json["trackingNumber"], "TRACK-1");
        assert!(json["estimatedDeliveryDate"]
            .as_str()
            .unwrap()
            .starts_with("2025-03-08"));
    }

    #[test]
    fn test_created_record_decodes_envelope() {
        let body = r#"{"data":{"_id":"66f1","user":"user-1","city":"Lagos"}}"#;
        let envelope: Envelope<CreatedRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.id, "66f1");
    }

    #[test]
    fn test_order_record_decodes() {
        let body = r#"{"data":{"_id":"ord-1","totalAmount":50.0,"status":"pending","paymentReference":"ORDER_1_2","shipment":"shp-1"}}"#;
        let envelope: Envelope<OrderRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.id, "ord-1");
        assert_eq!(envelope.data.shipment, Some(ShipmentId::new("shp-1")));
    }

    #[test]
    fn test_order_record_tolerates_missing_optionals() {
        let body = r#"{"data":{"_id":"ord-1","totalAmount":50.0,"status":"pending"}}"#;
        let envelope: Envelope<OrderRecord> = serde_json::from_str(body).unwrap();
        assert!(envelope.data.shipment.is_none());
    }
}
