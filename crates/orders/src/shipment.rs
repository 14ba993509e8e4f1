use serde::{Deserialize, Serialize};

use storefront_core::{AggregateId, Entity};

use crate::order::OrderId;

/// Shipment identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentId(pub AggregateId);

impl ShipmentId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Shipment workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentState {
    /// Assembled while the order is still in checkout.
    Checkout,
    /// Held back pending payment or review.
    Onhold,
    /// Ready to be handed to the carrier.
    Ready,
    /// Handed to the carrier.
    Shipped,
    /// Came back from the customer.
    Returned,
    Cancelled,
}

/// A grouping of units destined to ship together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    id: ShipmentId,
    /// Owning order; maintained by `Order::add_shipment` /
    /// `Order::remove_shipment`. There is deliberately no public setter.
    pub(crate) order: Option<OrderId>,
    state: ShipmentState,
    tracking_code: Option<String>,
}

impl Shipment {
    /// New shipment in the default `Checkout` state, attached to nothing.
    pub fn new(id: ShipmentId) -> Self {
        Self {
            id,
            order: None,
            state: ShipmentState::Checkout,
            tracking_code: None,
        }
    }

    /// The order this shipment belongs to, if attached.
    pub fn order(&self) -> Option<OrderId> {
        self.order
    }

    pub fn state(&self) -> ShipmentState {
        self.state
    }

    /// Unconditional setter; the shipping workflow owns transition legality.
    pub fn set_state(&mut self, state: ShipmentState) {
        self.state = state;
    }

    pub fn tracking_code(&self) -> Option<&str> {
        self.tracking_code.as_deref()
    }

    pub fn set_tracking_code(&mut self, code: Option<String>) {
        self.tracking_code = code;
    }
}

impl Entity for Shipment {
    type Id = ShipmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
