//! Normalised journal entry payload sent to the accounting API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerdesk_core::AccountId;

use crate::amount::{checked_sum, parse_amount};
use crate::draft::JournalEntryDraft;
use crate::error::{JournalError, JournalResult};

/// Body of a create/update journal entry request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub entry_date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    pub lines: Vec<SubmissionLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionLine {
    pub account_ref: AccountId,
    #[serde(with = "rust_decimal::serde::float")]
    pub debit_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SubmissionPayload {
    /// Sum of the debit amounts, or `None` if it does not fit in a `Decimal`.
    pub fn total_debit(&self) -> Option<Decimal> {
        checked_sum(self.lines.iter().map(|l| l.debit_amount))
    }

    /// Sum of the credit amounts, or `None` if it does not fit in a `Decimal`.
    pub fn total_credit(&self) -> Option<Decimal> {
        checked_sum(self.lines.iter().map(|l| l.credit_amount))
    }
}

/// Build the payload for a valid draft.
///
/// Fails with [`JournalError::InvalidDraft`] when the draft does not validate
/// or an account reference is not an integer id.
pub fn to_submission_payload(draft: &JournalEntryDraft) -> JournalResult<SubmissionPayload> {
    let result = draft.validate();
    if !result.is_valid() {
        return Err(JournalError::InvalidDraft {
            reason: result.problems().join("; "),
        });
    }

    let lines = draft
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let account_ref = line.account_ref.parse::<AccountId>().map_err(|e| {
                JournalError::InvalidDraft {
                    reason: format!("line {}: {}", index + 1, e),
                }
            })?;
            Ok(SubmissionLine {
                account_ref,
                debit_amount: parse_amount(&line.debit_amount),
                credit_amount: parse_amount(&line.credit_amount),
                description: non_empty(&line.description),
            })
        })
        .collect::<JournalResult<Vec<_>>>()?;

    Ok(SubmissionPayload {
        entry_date: draft.entry_date,
        description: draft.description.trim().to_string(),
        reference_number: non_empty(&draft.reference_number),
        lines,
    })
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
