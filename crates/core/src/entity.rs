//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records fetched from the accounting backend (accounts, persisted journal
/// entries) are entities: two fetches with the same id describe the same thing,
/// even if their fields differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
