//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; two
/// instances with the same values are the same value. Entities, by contrast,
/// are the same only when their identifiers match. An `Address` is a value
/// object; an `Order` is an entity.
///
/// To "modify" a value object, build a new one with the new values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
