//! Entity trait: identity + continuity across state changes.
//!
//! Reference data (units of measure, tenants) is entity-shaped: two values
//! with the same id are the same thing even if attributes differ.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
