//! Checkout attempt state machine.
//!
//! A checkout attempt moves through a fixed sequence of stages, each gated
//! on the previous one. Partial failure is a first-class transition: every
//! in-progress stage can move to `Failed`, recording where the attempt
//! stopped and which server records had already been created.

use crate::error::CheckoutError;
use crate::payment::PaymentReference;
use serde::{Deserialize, Serialize};
use std::fmt;
use vitrine_commerce::{AddressId, CartItem, Money, OrderId, ShipmentId};

/// Stages of a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStage {
    /// Attempt created, nothing external invoked yet.
    Idle,
    /// Payment widget open, waiting for the payer.
    AwaitingPayment,
    /// Creating the shipping address record.
    CreatingAddress,
    /// Creating the order record.
    CreatingOrder,
    /// Creating the shipment record.
    CreatingShipment,
    /// Patching the order with the shipment id.
    AttachingShipment,
    /// Order confirmed.
    Complete,
    /// Attempt aborted at some stage.
    Failed,
}

impl CheckoutStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Idle => "idle",
            CheckoutStage::AwaitingPayment => "awaiting_payment",
            CheckoutStage::CreatingAddress => "creating_address",
            CheckoutStage::CreatingOrder => "creating_order",
            CheckoutStage::CreatingShipment => "creating_shipment",
            CheckoutStage::AttachingShipment => "attaching_shipment",
            CheckoutStage::Complete => "complete",
            CheckoutStage::Failed => "failed",
        }
    }

    /// The stage that follows this one in a successful attempt.
    pub fn next(&self) -> Option<CheckoutStage> {
        match self {
            CheckoutStage::Idle => Some(CheckoutStage::AwaitingPayment),
            CheckoutStage::AwaitingPayment => Some(CheckoutStage::CreatingAddress),
            CheckoutStage::CreatingAddress => Some(CheckoutStage::CreatingOrder),
            CheckoutStage::CreatingOrder => Some(CheckoutStage::CreatingShipment),
            CheckoutStage::CreatingShipment => Some(CheckoutStage::AttachingShipment),
            CheckoutStage::AttachingShipment => Some(CheckoutStage::Complete),
            CheckoutStage::Complete | CheckoutStage::Failed => None,
        }
    }

    /// Check if the attempt can no longer move.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStage::Complete | CheckoutStage::Failed)
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What one checkout attempt has gathered so far.
///
/// The item and total snapshot is taken at submission time and never
/// changes while the external sequence runs. Server ids fill in as each
/// remote step succeeds; after a failure they tell the caller exactly
/// which records were left behind server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutAttempt {
    /// Cart items at submission time.
    pub items: Vec<CartItem>,
    /// Cart total at submission time.
    pub total: Money,
    /// Client-generated payment reference for this attempt.
    pub reference: PaymentReference,
    /// Address record id, once created.
    pub address_id: Option<AddressId>,
    /// Order record id, once created.
    pub order_id: Option<OrderId>,
    /// Shipment record id, once created.
    pub shipment_id: Option<ShipmentId>,
}

/// Checkout attempt state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
    /// Snapshot and progressively gathered server ids.
    pub attempt: CheckoutAttempt,
    failed_at: Option<CheckoutStage>,
    failure: Option<String>,
}

impl CheckoutFlow {
    /// Start a new attempt over a cart snapshot.
    pub fn new(items: Vec<CartItem>, total: Money, reference: PaymentReference) -> Self {
        Self {
            stage: CheckoutStage::Idle,
            attempt: CheckoutAttempt {
                items,
                total,
                reference,
                address_id: None,
                order_id: None,
                shipment_id: None,
            },
            failed_at: None,
            failure: None,
        }
    }

    /// The current stage.
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// The stage the attempt was in when it failed, if it failed.
    pub fn failed_at(&self) -> Option<CheckoutStage> {
        self.failed_at
    }

    /// The failure reason, if the attempt failed.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Advance to the next stage.
    ///
    /// Only the immediate successor is a valid target; anything else is a
    /// programmer error reported as `InvalidTransition`.
    pub fn advance(&mut self, to: CheckoutStage) -> Result<(), CheckoutError> {
        if self.stage.next() != Some(to) {
            return Err(CheckoutError::InvalidTransition {
                from: self.stage,
                to,
            });
        }
        self.stage = to;
        Ok(())
    }

    /// Abort the attempt, recording the stage it was in and why.
    ///
    /// Has no effect on an attempt that already reached a terminal stage.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.stage.is_terminal() {
            return;
        }
        self.failed_at = Some(self.stage);
        self.failure = Some(reason.into());
        self.stage = CheckoutStage::Failed;
    }
}
