//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities are identified by their id, not their attributes: a shipment
/// whose tracking code changes is still the same shipment. Contrast with
/// [`crate::ValueObject`].
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
