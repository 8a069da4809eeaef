//! Editable journal entry drafts.
//!
//! A draft is an immutable value: every edit returns a new draft and leaves
//! the original untouched. Amounts are kept exactly as typed so the form can
//! show half-typed input; interpretation happens in validation.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerdesk_core::ValueObject;

use crate::amount;
use crate::entry::{EntryAction, PersistedJournalEntry};
use crate::error::{JournalError, JournalResult};
use crate::payload::{self, SubmissionPayload};
use crate::validation::{self, ValidationResult};

/// Fewest lines a journal entry may have.
pub const MIN_LINES: usize = 2;

/// Editable field of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineField {
    Account,
    Debit,
    Credit,
    Description,
}

/// One user-editable ledger line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalLineDraft {
    /// Account identifier as selected in the picker; empty when unset.
    pub account_ref: String,
    pub debit_amount: String,
    pub credit_amount: String,
    pub description: String,
}

impl JournalLineDraft {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn debit(account_ref: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            account_ref: account_ref.into(),
            debit_amount: amount.into(),
            ..Self::default()
        }
    }

    pub fn credit(account_ref: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            account_ref: account_ref.into(),
            credit_amount: amount.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Apply one field edit, keeping debit and credit mutually exclusive.
    fn with_field(&self, field: LineField, value: String) -> Self {
        let mut line = self.clone();
        match field {
            LineField::Account => line.account_ref = value,
            LineField::Description => line.description = value,
            LineField::Debit => {
                if amount::is_positive(&value) {
                    line.credit_amount.clear();
                }
                line.debit_amount = value;
            }
            LineField::Credit => {
                if amount::is_positive(&value) {
                    line.debit_amount.clear();
                }
                line.credit_amount = value;
            }
        }
        line
    }
}

impl ValueObject for JournalLineDraft {}

/// A journal entry being composed or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryDraft {
    #[serde(default = "current_date")]
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reference_number: String,
    pub lines: Vec<JournalLineDraft>,
}

impl ValueObject for JournalEntryDraft {}

impl Default for JournalEntryDraft {
    fn default() -> Self {
        Self::today()
    }
}

impl JournalEntryDraft {
    /// Fresh draft dated `entry_date`, with two blank lines.
    pub fn new(entry_date: NaiveDate) -> Self {
        Self {
            entry_date,
            description: String::new(),
            reference_number: String::new(),
            lines: vec![JournalLineDraft::blank(); MIN_LINES],
        }
    }

    /// Fresh draft dated today (UTC).
    pub fn today() -> Self {
        Self::new(current_date())
    }

    /// Draft pre-filled from a stored entry, for editing.
    ///
    /// Locked entries are rejected before any draft is built.
    pub fn from_persisted(entry: &PersistedJournalEntry) -> JournalResult<Self> {
        entry.ensure_editable(EntryAction::Edit)?;

        let lines = entry
            .lines
            .iter()
            .map(|line| JournalLineDraft {
                account_ref: line.account_id.to_string(),
                debit_amount: amount_field(line.debit_amount),
                credit_amount: amount_field(line.credit_amount),
                description: line.description.clone().unwrap_or_default(),
            })
            .collect();

        Ok(Self {
            entry_date: entry.entry_date,
            description: entry.description.clone(),
            reference_number: entry.reference_number.clone().unwrap_or_default(),
            lines,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference_number = reference.into();
        self
    }

    pub fn with_lines(mut self, lines: Vec<JournalLineDraft>) -> Self {
        self.lines = lines;
        self
    }

    /// Set one field of line `index`.
    ///
    /// A positive debit clears the line's credit and vice versa. Only the
    /// targeted line differs in the returned draft.
    pub fn set_line_field(
        &self,
        index: usize,
        field: LineField,
        value: impl Into<String>,
    ) -> JournalResult<Self> {
        let line = self.line(index)?;
        let updated = line.with_field(field, value.into());

        let mut next = self.clone();
        next.lines[index] = updated;
        Ok(next)
    }

    /// Append a blank line.
    pub fn add_line(&self) -> Self {
        let mut next = self.clone();
        next.lines.push(JournalLineDraft::blank());
        next
    }

    /// Remove line `index`, refusing to go below [`MIN_LINES`].
    pub fn remove_line(&self, index: usize) -> JournalResult<Self> {
        if self.lines.len() <= MIN_LINES {
            tracing::debug!(lines = self.lines.len(), "refused to remove journal line");
            return Err(JournalError::MinimumLines { minimum: MIN_LINES });
        }
        self.line(index)?;

        let mut next = self.clone();
        next.lines.remove(index);
        Ok(next)
    }

    pub fn validate(&self) -> ValidationResult {
        validation::validate(self)
    }

    pub fn to_submission_payload(&self) -> JournalResult<SubmissionPayload> {
        payload::to_submission_payload(self)
    }

    fn line(&self, index: usize) -> JournalResult<&JournalLineDraft> {
        self.lines.get(index).ok_or(JournalError::LineOutOfRange {
            index,
            len: self.lines.len(),
        })
    }
}

fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

fn amount_field(value: Decimal) -> String {
    if value > Decimal::ZERO {
        value.normalize().to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::SourceDocument;
    use crate::entry::tests::test_entry;
    use proptest::prelude::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn rent_draft() -> JournalEntryDraft {
        JournalEntryDraft::new(test_date())
            .with_description("Rent payment")
            .with_lines(vec![
                JournalLineDraft::debit("1", "500.00"),
                JournalLineDraft::credit("2", "500.00"),
            ])
    }

    #[test]
    fn new_draft_has_two_blank_lines() {
        let draft = JournalEntryDraft::new(test_date());
        assert_eq!(draft.lines, vec![JournalLineDraft::blank(), JournalLineDraft::blank()]);
        assert!(draft.description.is_empty());
    }

    #[test]
    fn positive_debit_clears_credit() {
        let draft = rent_draft();
        let next = draft.set_line_field(1, LineField::Debit, "75").unwrap();
        assert_eq!(next.lines[1].debit_amount, "75");
        assert_eq!(next.lines[1].credit_amount, "");
        // Original untouched.
        assert_eq!(draft.lines[1].credit_amount, "500.00");
    }

    #[test]
    fn positive_credit_clears_debit() {
        let next = rent_draft().set_line_field(0, LineField::Credit, "10.5").unwrap();
        assert_eq!(next.lines[0].credit_amount, "10.5");
        assert_eq!(next.lines[0].debit_amount, "");
    }

    #[test]
    fn non_positive_amount_keeps_other_side() {
        let draft = rent_draft();
        for value in ["", "0", "0.00", "-3", "abc"] {
            let next = draft.set_line_field(1, LineField::Debit, value).unwrap();
            assert_eq!(next.lines[1].credit_amount, "500.00", "value {value:?}");
            assert_eq!(next.lines[1].debit_amount, value);
        }
    }

    #[test]
    fn account_and_description_edits_touch_only_their_field() {
        let draft = rent_draft();
        let next = draft
            .set_line_field(0, LineField::Account, "9")
            .unwrap()
            .set_line_field(0, LineField::Description, "office")
            .unwrap();
        assert_eq!(next.lines[0].account_ref, "9");
        assert_eq!(next.lines[0].description, "office");
        assert_eq!(next.lines[0].debit_amount, "500.00");
        assert_eq!(next.lines[1], draft.lines[1]);
        assert_eq!(next.description, draft.description);
    }

    #[test]
    fn set_line_field_out_of_range_is_rejected() {
        let err = rent_draft().set_line_field(5, LineField::Debit, "1").unwrap_err();
        assert_eq!(err, JournalError::LineOutOfRange { index: 5, len: 2 });
    }

    #[test]
    fn add_line_appends_blank_line() {
        let next = rent_draft().add_line().add_line();
        assert_eq!(next.lines.len(), 4);
        assert_eq!(next.lines[3], JournalLineDraft::blank());
    }

    #[test]
    fn remove_line_with_two_lines_is_rejected() {
        let draft = rent_draft();
        let err = draft.remove_line(0).unwrap_err();
        assert_eq!(err, JournalError::MinimumLines { minimum: MIN_LINES });
        assert_eq!(draft.lines.len(), 2);
    }

    #[test]
    fn remove_line_preserves_order_of_the_rest() {
        let draft = rent_draft().with_lines(vec![
            JournalLineDraft::debit("1", "1"),
            JournalLineDraft::debit("2", "2"),
            JournalLineDraft::credit("3", "3"),
        ]);
        let next = draft.remove_line(1).unwrap();
        let refs: Vec<&str> = next.lines.iter().map(|l| l.account_ref.as_str()).collect();
        assert_eq!(refs, vec!["1", "3"]);
    }

    #[test]
    fn remove_line_out_of_range_is_rejected() {
        let draft = rent_draft().add_line();
        assert_eq!(
            draft.remove_line(3).unwrap_err(),
            JournalError::LineOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn add_then_remove_round_trips() {
        let draft = rent_draft();
        let added = draft.add_line();
        let back = added.remove_line(added.lines.len() - 1).unwrap();
        assert_eq!(back, draft);
    }

    #[test]
    fn hydrates_editable_entry() {
        let entry = test_entry("JE-0001", "2024-03-01", None);
        let draft = JournalEntryDraft::from_persisted(&entry).unwrap();
        assert_eq!(draft.entry_date, test_date());
        assert_eq!(draft.description, "entry JE-0001");
        assert_eq!(draft.lines[0], JournalLineDraft::debit("1", "500"));
        assert_eq!(
            draft.lines[1],
            JournalLineDraft::credit("2", "500").with_description("monthly")
        );
        assert!(draft.validate().is_valid());
    }

    #[test]
    fn locked_entry_is_never_hydrated() {
        let entry = test_entry(
            "JE-0002",
            "2024-03-01",
            Some(SourceDocument {
                source_type: "invoice".into(),
                source_id: Some(4),
            }),
        );
        let err = JournalEntryDraft::from_persisted(&entry).unwrap_err();
        assert!(matches!(err, JournalError::EntryLocked { action: EntryAction::Edit, .. }));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after setting a positive amount on one side, the other side is empty.
        #[test]
        fn positive_amount_clears_opposite_side(
            cents in 1u32..100_000_000u32,
            index in 0usize..4,
            credit_side in any::<bool>(),
        ) {
            let draft = JournalEntryDraft::new(test_date()).with_lines(vec![
                JournalLineDraft { debit_amount: "5".into(), credit_amount: "5".into(), ..Default::default() };
                4
            ]);
            let value = Decimal::new(i64::from(cents), 2).to_string();
            let field = if credit_side { LineField::Credit } else { LineField::Debit };

            let next = draft.set_line_field(index, field, value).unwrap();
            let edited = &next.lines[index];
            let opposite = if credit_side { &edited.debit_amount } else { &edited.credit_amount };
            prop_assert_eq!(opposite.as_str(), "");
            for (i, line) in next.lines.iter().enumerate() {
                if i != index {
                    prop_assert_eq!(line, &draft.lines[i]);
                }
            }
        }
    }
}
