use serde::{Deserialize, Serialize};

use storefront_core::{AggregateId, Entity};

/// Inventory unit identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryUnitId(pub AggregateId);

impl InventoryUnitId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InventoryUnitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Fulfillment state of a single inventory unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryUnitState {
    /// Reserved while its order is still in checkout.
    Checkout,
    /// Held back pending payment or review.
    Onhold,
    /// Fulfilled from stock.
    Sold,
    /// Sold without stock on hand; waits for replenishment.
    Backordered,
    /// Sent back by the customer.
    Returned,
}

/// The smallest trackable unit of a purchased product.
///
/// One unit per physical (or virtual) piece; a line item with quantity 3
/// owns three of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUnit {
    id: InventoryUnitId,
    state: InventoryUnitState,
}

impl InventoryUnit {
    /// New unit in the default `Checkout` state.
    pub fn new(id: InventoryUnitId) -> Self {
        Self {
            id,
            state: InventoryUnitState::Checkout,
        }
    }

    /// New unit in a given state.
    pub fn with_state(id: InventoryUnitId, state: InventoryUnitState) -> Self {
        Self { id, state }
    }

    pub fn state(&self) -> InventoryUnitState {
        self.state
    }

    /// Unconditional setter; fulfillment workflows own transition legality.
    pub fn set_state(&mut self, state: InventoryUnitState) {
        self.state = state;
    }

    pub fn is_sold(&self) -> bool {
        self.state == InventoryUnitState::Sold
    }

    pub fn is_backordered(&self) -> bool {
        self.state == InventoryUnitState::Backordered
    }
}

impl Entity for InventoryUnit {
    type Id = InventoryUnitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_unit_id() -> InventoryUnitId {
        InventoryUnitId::new(AggregateId::new())
    }

    #[test]
    fn new_unit_starts_in_checkout() {
        let unit = InventoryUnit::new(test_unit_id());
        assert_eq!(unit.state(), InventoryUnitState::Checkout);
        assert!(!unit.is_sold());
        assert!(!unit.is_backordered());
    }

    #[test]
    fn state_is_mutable_and_predicates_follow() {
        let mut unit = InventoryUnit::new(test_unit_id());

        unit.set_state(InventoryUnitState::Backordered);
        assert!(unit.is_backordered());
        assert!(!unit.is_sold());

        unit.set_state(InventoryUnitState::Sold);
        assert!(unit.is_sold());
        assert!(!unit.is_backordered());
    }

    #[test]
    fn only_backordered_counts_as_backordered() {
        for state in [
            InventoryUnitState::Checkout,
            InventoryUnitState::Onhold,
            InventoryUnitState::Sold,
            InventoryUnitState::Returned,
        ] {
            let unit = InventoryUnit::with_state(test_unit_id(), state);
            assert!(!unit.is_backordered(), "{state:?} must not read as backordered");
        }
    }
}
