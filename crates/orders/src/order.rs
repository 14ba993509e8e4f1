use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{AggregateId, AggregateRoot, Entity};
use storefront_inventory::InventoryUnit;
use storefront_parties::{Address, Customer};

use crate::adjustment::{Adjustment, AdjustmentId, SHIPPING_ADJUSTMENT, TAX_ADJUSTMENT};
use crate::item::{OrderItem, OrderItemId};
use crate::shipment::{Shipment, ShipmentId};

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Shipping side of the order lifecycle.
///
/// The aggregate defines no transitions of its own; the checkout/shipping
/// workflow decides which moves are legal and drives the setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderShippingState {
    Checkout,
    Onhold,
    Ready,
    Backorder,
    PartiallyShipped,
    Shipped,
    Returned,
    Cancelled,
}

/// Aggregate root: Order.
///
/// Owns its line items, shipments and adjustments, and is the sole
/// maintainer of their back-references: a shipment (or item, or adjustment)
/// points back at this order exactly while it is a member of the matching
/// collection. Category views over adjustments, the inventory-unit sequence
/// and all monetary totals are derived on demand from the canonical
/// collections and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    number: Option<String>,
    customer: Option<Customer>,
    shipping_address: Option<Address>,
    billing_address: Option<Address>,
    /// ISO-like currency code (e.g. "USD", "EUR"); unset until checkout
    /// pins it.
    currency: Option<String>,
    items: Vec<OrderItem>,
    shipments: Vec<Shipment>,
    adjustments: Vec<Adjustment>,
    shipping_state: OrderShippingState,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    version: u64,
}

impl Order {
    /// New empty order in the `Checkout` shipping state.
    pub fn new(id: OrderId) -> Self {
        Self {
            id,
            number: None,
            customer: None,
            shipping_address: None,
            billing_address: None,
            currency: None,
            items: Vec::new(),
            shipments: Vec::new(),
            adjustments: Vec::new(),
            shipping_state: OrderShippingState::Checkout,
            created_at: Utc::now(),
            completed_at: None,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn shipping_address(&self) -> Option<&Address> {
        self.shipping_address.as_ref()
    }

    pub fn billing_address(&self) -> Option<&Address> {
        self.billing_address.as_ref()
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn shipping_state(&self) -> OrderShippingState {
        self.shipping_state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_items(&self) -> usize {
        self.items.len()
    }

    pub fn has_item(&self, id: &OrderItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn has_shipment(&self, id: &ShipmentId) -> bool {
        self.shipments.iter().any(|shipment| shipment.id() == id)
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    pub fn has_adjustment(&self, id: &AdjustmentId) -> bool {
        self.adjustments.iter().any(|adjustment| adjustment.id() == id)
    }

    /// Adjustments labelled `SHIPPING_ADJUSTMENT`, in collection order.
    pub fn shipping_adjustments(&self) -> impl Iterator<Item = &Adjustment> {
        self.adjustments
            .iter()
            .filter(|adjustment| adjustment.label() == SHIPPING_ADJUSTMENT)
    }

    /// Adjustments labelled `TAX_ADJUSTMENT`, in collection order.
    pub fn tax_adjustments(&self) -> impl Iterator<Item = &Adjustment> {
        self.adjustments
            .iter()
            .filter(|adjustment| adjustment.label() == TAX_ADJUSTMENT)
    }

    /// All inventory units reachable through the owned items, concatenated
    /// in item order.
    pub fn inventory_units(&self) -> impl Iterator<Item = &InventoryUnit> {
        self.items.iter().flat_map(|item| item.inventory_units().iter())
    }

    /// Whether any unit anywhere in the order is backordered.
    ///
    /// Exactly the `Backordered` state counts; a single matching unit in any
    /// item is sufficient.
    pub fn is_backorder(&self) -> bool {
        self.inventory_units().any(|unit| unit.is_backordered())
    }

    /// Sum of line totals.
    pub fn items_total(&self) -> i64 {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Sum of non-neutral adjustment amounts.
    pub fn adjustments_total(&self) -> i64 {
        self.adjustments
            .iter()
            .filter(|adjustment| !adjustment.is_neutral())
            .map(Adjustment::amount)
            .sum()
    }

    /// Order total: items plus adjustments, never below zero.
    pub fn total(&self) -> i64 {
        (self.items_total() + self.adjustments_total()).max(0)
    }
}

impl Order {
    /// Attach a line item. No-op if an item with the same id is already a
    /// member.
    pub fn add_item(&mut self, mut item: OrderItem) {
        if self.has_item(item.id()) {
            return;
        }
        item.order = Some(self.id);
        self.items.push(item);
        self.version += 1;
    }

    /// Detach a line item and hand it back with its back-reference cleared.
    /// No-op returning `None` if absent.
    pub fn remove_item(&mut self, id: &OrderItemId) -> Option<OrderItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let mut item = self.items.remove(index);
        item.order = None;
        self.version += 1;
        Some(item)
    }

    /// Drop all line items.
    pub fn clear_items(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.version += 1;
    }

    /// Attach a shipment and point it back at this order, both sides in one
    /// call. No-op if a shipment with the same id is already a member.
    pub fn add_shipment(&mut self, mut shipment: Shipment) {
        if self.has_shipment(shipment.id()) {
            return;
        }
        shipment.order = Some(self.id);
        self.shipments.push(shipment);
        self.version += 1;
    }

    /// Detach a shipment and hand it back with its back-reference cleared.
    /// No-op returning `None` if absent.
    pub fn remove_shipment(&mut self, id: &ShipmentId) -> Option<Shipment> {
        let index = self.shipments.iter().position(|shipment| shipment.id() == id)?;
        let mut shipment = self.shipments.remove(index);
        shipment.order = None;
        self.version += 1;
        Some(shipment)
    }

    /// Attach an adjustment to this order. No-op if an adjustment with the
    /// same id is already a member.
    pub fn add_adjustment(&mut self, mut adjustment: Adjustment) {
        if self.has_adjustment(adjustment.id()) {
            return;
        }
        debug_assert!(
            adjustment.adjustable.is_none() || adjustment.adjustable == Some(self.id),
            "adjustment is already claimed by a different adjustable"
        );
        adjustment.adjustable = Some(self.id);
        self.adjustments.push(adjustment);
        self.version += 1;
    }

    /// Detach a single adjustment and hand it back with its adjustable
    /// reference cleared. No-op returning `None` if absent.
    pub fn remove_adjustment(&mut self, id: &AdjustmentId) -> Option<Adjustment> {
        let index = self
            .adjustments
            .iter()
            .position(|adjustment| adjustment.id() == id)?;
        let mut adjustment = self.adjustments.remove(index);
        adjustment.adjustable = None;
        self.version += 1;
        Some(adjustment)
    }

    /// Detach and remove every shipping-labelled adjustment; other labels
    /// are untouched. Returns the removed adjustments, detached.
    pub fn remove_shipping_adjustments(&mut self) -> Vec<Adjustment> {
        self.remove_adjustments_with_label(SHIPPING_ADJUSTMENT)
    }

    /// Detach and remove every tax-labelled adjustment; other labels are
    /// untouched. Returns the removed adjustments, detached.
    pub fn remove_tax_adjustments(&mut self) -> Vec<Adjustment> {
        self.remove_adjustments_with_label(TAX_ADJUSTMENT)
    }

    fn remove_adjustments_with_label(&mut self, label: &str) -> Vec<Adjustment> {
        let (mut removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.adjustments)
            .into_iter()
            .partition(|adjustment| adjustment.label() == label);
        self.adjustments = kept;

        for adjustment in &mut removed {
            adjustment.adjustable = None;
        }
        if !removed.is_empty() {
            self.version += 1;
        }
        removed
    }

    pub fn set_number(&mut self, number: Option<String>) {
        Self::assign(&mut self.number, number, &mut self.version);
    }

    pub fn set_customer(&mut self, customer: Option<Customer>) {
        Self::assign(&mut self.customer, customer, &mut self.version);
    }

    pub fn set_shipping_address(&mut self, address: Option<Address>) {
        Self::assign(&mut self.shipping_address, address, &mut self.version);
    }

    pub fn set_billing_address(&mut self, address: Option<Address>) {
        Self::assign(&mut self.billing_address, address, &mut self.version);
    }

    pub fn set_currency(&mut self, currency: Option<String>) {
        Self::assign(&mut self.currency, currency, &mut self.version);
    }

    /// Unconditional setter; transition legality belongs to the checkout
    /// workflow.
    pub fn set_shipping_state(&mut self, state: OrderShippingState) {
        Self::assign(&mut self.shipping_state, state, &mut self.version);
    }

    /// Mark checkout as finished. A completed order stays completed with its
    /// original timestamp.
    pub fn complete(&mut self) {
        if self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
            self.version += 1;
        }
    }

    fn assign<T: PartialEq>(slot: &mut T, value: T, version: &mut u64) {
        if *slot != value {
            *slot = value;
            *version += 1;
        }
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
