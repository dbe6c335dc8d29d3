//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. They represent
/// concepts where identity doesn't matter - only the values matter. To
/// "modify" one, create a new one with the new values.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// Example:
/// - a normalized unit code like `"KG"` is a value object
/// - `UnitOfMeasure { id: UomId(...), code: "KG", ... }` is an entity
///
/// The trait requires `Clone` (values are copied, not referenced),
/// `PartialEq` (compared by attribute values) and `Debug` (logging, testing).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
