//! Errors signalled by journal draft operations.
//!
//! Validation failures are *not* errors: they are reported as data in
//! [`crate::ValidationResult`]. The variants here are rejected operations.

use thiserror::Error;

use crate::entry::{EntryAction, SourceDocument};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JournalError {
    /// Removing a line would leave fewer lines than double entry needs.
    #[error("a journal entry must have at least {minimum} lines")]
    MinimumLines { minimum: usize },

    #[error("line {index} does not exist (entry has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// A payload was requested for a draft that does not validate.
    #[error("journal entry is not valid: {reason}")]
    InvalidDraft { reason: String },

    /// The entry was generated from another document and is read-only.
    #[error("journal entry {entry_number} was generated from {document} and cannot be {action}")]
    EntryLocked {
        entry_number: String,
        document: SourceDocument,
        action: EntryAction,
    },
}

pub type JournalResult<T> = Result<T, JournalError>;
