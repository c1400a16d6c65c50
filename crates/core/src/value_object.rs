//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new one. `Price` is the main example in this
/// workspace: two prices of `10.0` are interchangeable, while two products
/// with the same price are not.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
