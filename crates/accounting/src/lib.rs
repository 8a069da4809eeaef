//! Accounting module: chart of accounts and double-entry journal drafts.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod account;
pub mod amount;
pub mod draft;
pub mod entry;
pub mod error;
pub mod listing;
pub mod payload;
pub mod validation;

pub use account::{Account, AccountKind, ChartOfAccounts, NormalBalance};
pub use amount::{BALANCE_TOLERANCE, format_amount, parse_amount};
pub use draft::{JournalEntryDraft, JournalLineDraft, LineField, MIN_LINES};
pub use entry::{EditLock, EntryAction, PersistedJournalEntry, PersistedJournalLine, SourceDocument};
pub use error::{JournalError, JournalResult};
pub use listing::{EntryFilter, Page, Pagination, query_entries};
pub use payload::{SubmissionLine, SubmissionPayload, to_submission_payload};
pub use validation::{BalanceError, EntryErrors, LineErrors, ValidationResult, validate};
