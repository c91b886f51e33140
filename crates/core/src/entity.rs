//! Entity trait: identity that survives state changes.

/// Entity marker + minimal interface.
///
/// A cart stays the same cart while its items change; an order stays the same
/// order while its status moves on.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
