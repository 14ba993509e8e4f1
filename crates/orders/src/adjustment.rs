use serde::{Deserialize, Serialize};

use storefront_core::{AggregateId, Entity};

use crate::order::OrderId;

/// Reserved label for shipping charges.
pub const SHIPPING_ADJUSTMENT: &str = "shipping";

/// Reserved label for taxes.
pub const TAX_ADJUSTMENT: &str = "tax";

/// Adjustment identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjustmentId(pub AggregateId);

impl AdjustmentId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for AdjustmentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A labelled, signed monetary delta attached to at most one order.
///
/// The label is a free-form category tag; `SHIPPING_ADJUSTMENT` and
/// `TAX_ADJUSTMENT` carry special meaning to the order's category views.
/// Label and amount are fixed at construction; whoever computes the amount
/// (pricing, tax) creates a fresh adjustment rather than editing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    id: AdjustmentId,
    /// Owning order; maintained by `Order::add_adjustment` and the removal
    /// entry points.
    pub(crate) adjustable: Option<OrderId>,
    label: String,
    description: String,
    /// Signed amount in the smallest currency unit; negative is a credit.
    amount: i64,
    /// Neutral adjustments are informational and do not alter the total.
    neutral: bool,
}

impl Adjustment {
    pub fn new(
        id: AdjustmentId,
        label: impl Into<String>,
        description: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            id,
            adjustable: None,
            label: label.into(),
            description: description.into(),
            amount,
            neutral: false,
        }
    }

    /// The order currently holding this adjustment, if any.
    pub fn adjustable(&self) -> Option<OrderId> {
        self.adjustable
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn is_neutral(&self) -> bool {
        self.neutral
    }

    pub fn set_neutral(&mut self, neutral: bool) {
        self.neutral = neutral;
    }

    pub fn is_charge(&self) -> bool {
        self.amount > 0
    }

    pub fn is_credit(&self) -> bool {
        self.amount < 0
    }
}

impl Entity for Adjustment {
    type Id = AdjustmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
