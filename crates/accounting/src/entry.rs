//! Persisted journal entries and their edit lock.
//!
//! Entries generated from another business document (an invoice, a payment)
//! carry a `sourceDocument` marker. Such entries are read-only here: they are
//! corrected through the originating document, never through the journal form.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerdesk_core::{AccountId, Entity, JournalEntryId};

use crate::error::{JournalError, JournalResult};

/// Marker naming the document a journal entry was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub source_type: String, // e.g. "invoice", "payment"
    #[serde(default)]
    pub source_id: Option<i64>,
}

impl core::fmt::Display for SourceDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.source_id {
            Some(id) => write!(f, "{} #{}", self.source_type, id),
            None => f.write_str(&self.source_type),
        }
    }
}

/// One stored ledger line, with the account's display fields resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedJournalLine {
    #[serde(default)]
    pub id: Option<i64>,
    pub account_id: AccountId,
    #[serde(default)]
    pub account_code: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub debit_amount: Decimal,
    #[serde(default)]
    pub credit_amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// A journal entry as stored by the accounting backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedJournalEntry {
    pub id: JournalEntryId,
    pub entry_number: String,
    pub entry_date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub total_debit: Decimal,
    #[serde(default)]
    pub total_credit: Decimal,
    #[serde(default)]
    pub lines: Vec<PersistedJournalLine>,
    #[serde(default)]
    pub source_document: Option<SourceDocument>,
}

impl Entity for PersistedJournalEntry {
    type Id = JournalEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Whether a persisted entry may be changed through the journal form.
///
/// Determined entirely by the fetched data; `Locked` never goes back to
/// `Editable` from within this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditLock {
    Editable,
    Locked { document: SourceDocument },
}

/// Write operations guarded by the edit lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryAction {
    Edit,
    Delete,
}

impl core::fmt::Display for EntryAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            EntryAction::Edit => "edited",
            EntryAction::Delete => "deleted",
        })
    }
}

impl PersistedJournalEntry {
    pub fn edit_lock(&self) -> EditLock {
        match &self.source_document {
            Some(document) => EditLock::Locked {
                document: document.clone(),
            },
            None => EditLock::Editable,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.source_document.is_some()
    }

    /// Reject `action` when the entry is locked by a source document.
    pub fn ensure_editable(&self, action: EntryAction) -> JournalResult<()> {
        match self.edit_lock() {
            EditLock::Editable => Ok(()),
            EditLock::Locked { document } => {
                tracing::debug!(
                    entry = %self.entry_number,
                    %document,
                    %action,
                    "rejected write on locked journal entry"
                );
                Err(JournalError::EntryLocked {
                    entry_number: self.entry_number.clone(),
                    document,
                    action,
                })
            }
        }
    }

    pub fn is_balanced(&self) -> bool {
        crate::amount::within_tolerance(self.total_debit, self.total_credit)
    }
}
