//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A value object is defined entirely by its attribute values: two
/// instances with the same values are the same value. It has no
/// identifier and no lifecycle of its own — to "change" one, build a new
/// one.
///
/// `Address { zip_code, street }` is the canonical example here: it is
/// owned by a `Customer` and compared field-by-field, while `Customer`
/// itself is an [`Entity`](crate::Entity) identified by its id.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
