//! Inventory domain module.
//!
//! Tracks individual inventory units and their fulfillment state,
//! implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod unit;

pub use unit::{InventoryUnit, InventoryUnitId, InventoryUnitState};
