//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances with the same attribute values
/// are equal. Editing one means building a new value, never mutating a shared one.
///
/// Journal drafts are value objects: every edit operation returns a fresh draft,
/// so "did anything change?" is answered with `==`.
///
/// ```ignore
/// let before = draft.clone();
/// let after = draft.add_line().remove_line(2)?;
/// assert_eq!(before, after);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
