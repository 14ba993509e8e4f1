use serde::{Deserialize, Serialize};

use storefront_core::{AggregateId, DomainError, DomainResult, Entity};
use storefront_inventory::{InventoryUnit, InventoryUnitId};

use crate::order::OrderId;

/// Catalog product identifier.
///
/// The catalog is a separate bounded context; orders reference it by id
/// only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderItemId(pub AggregateId);

impl OrderItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Line item: one purchased product in some quantity, together with the
/// inventory units that fulfill it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: OrderItemId,
    /// Owning order; maintained by `Order::add_item` / `Order::remove_item`.
    pub(crate) order: Option<OrderId>,
    product_id: ProductId,
    quantity: u32,
    /// Price per unit in the smallest currency unit (e.g., cents).
    unit_price: i64,
    units: Vec<InventoryUnit>,
}

impl OrderItem {
    pub fn new(
        id: OrderItemId,
        product_id: ProductId,
        quantity: u32,
        unit_price: i64,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if unit_price < 0 {
            return Err(DomainError::validation("unit_price cannot be negative"));
        }

        Ok(Self {
            id,
            order: None,
            product_id,
            quantity,
            unit_price,
            units: Vec::new(),
        })
    }

    /// The order this item belongs to, if attached.
    pub fn order(&self) -> Option<OrderId> {
        self.order
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    /// Line total, derived: unit price times quantity.
    pub fn total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }

    pub fn inventory_units(&self) -> &[InventoryUnit] {
        &self.units
    }

    pub fn has_inventory_unit(&self, id: &InventoryUnitId) -> bool {
        self.units.iter().any(|unit| unit.id() == id)
    }

    /// Attach a unit to this line. No-op if a unit with the same id is
    /// already present.
    pub fn add_inventory_unit(&mut self, unit: InventoryUnit) {
        if self.has_inventory_unit(unit.id()) {
            return;
        }
        self.units.push(unit);
    }

    pub fn remove_inventory_unit(&mut self, id: &InventoryUnitId) -> Option<InventoryUnit> {
        let index = self.units.iter().position(|unit| unit.id() == id)?;
        Some(self.units.remove(index))
    }
}

impl Entity for OrderItem {
    type Id = OrderItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_inventory::InventoryUnitState;

    fn test_item_id() -> OrderItemId {
        OrderItemId::new(AggregateId::new())
    }

    fn test_product_id() -> ProductId {
        ProductId::new(AggregateId::new())
    }

    fn test_unit() -> InventoryUnit {
        InventoryUnit::new(InventoryUnitId::new(AggregateId::new()))
    }

    #[test]
    fn new_item_is_detached_and_totals_multiply_out() {
        let item = OrderItem::new(test_item_id(), test_product_id(), 3, 1250).unwrap();

        assert_eq!(item.order(), None);
        assert_eq!(item.quantity(), 3);
        assert_eq!(item.total(), 3750);
        assert!(item.inventory_units().is_empty());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = OrderItem::new(test_item_id(), test_product_id(), 0, 1250).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn negative_unit_price_is_rejected() {
        let err = OrderItem::new(test_item_id(), test_product_id(), 1, -1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn adding_the_same_unit_twice_is_a_noop() {
        let mut item = OrderItem::new(test_item_id(), test_product_id(), 2, 500).unwrap();
        let unit = test_unit();
        let unit_id = *unit.id();

        item.add_inventory_unit(unit.clone());
        item.add_inventory_unit(unit);

        assert_eq!(item.inventory_units().len(), 1);
        assert!(item.has_inventory_unit(&unit_id));
    }

    #[test]
    fn removing_a_unit_returns_it() {
        let mut item = OrderItem::new(test_item_id(), test_product_id(), 1, 500).unwrap();
        let mut unit = test_unit();
        unit.set_state(InventoryUnitState::Sold);
        let unit_id = *unit.id();
        item.add_inventory_unit(unit);

        let removed = item.remove_inventory_unit(&unit_id).unwrap();
        assert!(removed.is_sold());
        assert!(item.inventory_units().is_empty());
        assert_eq!(item.remove_inventory_unit(&unit_id), None);
    }
}
