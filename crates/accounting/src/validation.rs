//! Double-entry validation of journal drafts.
//!
//! `validate` is a pure function of the draft. It runs on every keystroke, so
//! it never fails: bad input shows up as messages in the result.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::amount::{self, format_amount, parse_amount};
use crate::draft::{JournalEntryDraft, MIN_LINES};

pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const ACCOUNT_REQUIRED: &str = "Account is required";
pub const AMOUNT_REQUIRED: &str = "Either debit or credit amount is required";
pub const AMOUNT_BOTH_SIDES: &str = "Cannot have both debit and credit";

/// Messages for one line, keyed by the form field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

impl LineErrors {
    pub fn is_empty(&self) -> bool {
        self.account.is_none() && self.amount.is_none()
    }
}

/// Messages for entry-level fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set only for drafts built outside the editing operations with too few lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<String>,
}

impl EntryErrors {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.lines.is_none()
    }
}

/// Debits and credits that do not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceError {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_debit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_credit: Decimal,
    pub message: String,
}

impl BalanceError {
    fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        let message = format!(
            "Debits ({}) must equal Credits ({})",
            format_amount(total_debit),
            format_amount(total_credit)
        );
        Self {
            total_debit,
            total_credit,
            message,
        }
    }
}

impl core::fmt::Display for BalanceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of validating a draft. Recomputed after every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Line index -> messages. Lines without problems are absent.
    pub field_errors: BTreeMap<usize, LineErrors>,
    pub entry_errors: EntryErrors,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_debit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_credit: Decimal,
    /// A total left the representable range and was clamped; never balanced.
    pub totals_overflowed: bool,
    pub is_balanced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_error: Option<BalanceError>,
}

impl ValidationResult {
    /// Gate for the submit button.
    pub fn is_valid(&self) -> bool {
        self.entry_errors.is_empty() && self.field_errors.is_empty() && self.is_balanced
    }

    pub fn line_errors(&self, index: usize) -> Option<&LineErrors> {
        self.field_errors.get(&index)
    }

    /// Every problem as a human-readable sentence (lines numbered from 1).
    pub fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(msg) = &self.entry_errors.description {
            out.push(msg.clone());
        }
        if let Some(msg) = &self.entry_errors.lines {
            out.push(msg.clone());
        }
        for (index, errors) in &self.field_errors {
            for msg in [&errors.account, &errors.amount].into_iter().flatten() {
                out.push(format!("line {}: {}", index + 1, msg));
            }
        }
        if let Some(balance) = &self.balance_error {
            out.push(balance.message.clone());
        }
        out
    }
}

/// Validate `draft` against double-entry rules and compute its totals.
pub fn validate(draft: &JournalEntryDraft) -> ValidationResult {
    let mut entry_errors = EntryErrors::default();
    if draft.description.trim().is_empty() {
        entry_errors.description = Some(DESCRIPTION_REQUIRED.to_string());
    }
    if draft.lines.len() < MIN_LINES {
        entry_errors.lines = Some(format!("A journal entry needs at least {MIN_LINES} lines"));
    }

    let mut field_errors = BTreeMap::new();
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut totals_overflowed = false;

    for (index, line) in draft.lines.iter().enumerate() {
        let debit = parse_amount(&line.debit_amount);
        let credit = parse_amount(&line.credit_amount);
        totals_overflowed |= !accumulate(&mut total_debit, debit);
        totals_overflowed |= !accumulate(&mut total_credit, credit);

        let mut errors = LineErrors::default();
        if line.account_ref.trim().is_empty() {
            errors.account = Some(ACCOUNT_REQUIRED.to_string());
        }

        let has_debit = debit > Decimal::ZERO;
        let has_credit = credit > Decimal::ZERO;
        if !has_debit && !has_credit {
            errors.amount = Some(AMOUNT_REQUIRED.to_string());
        } else if has_debit && has_credit {
            errors.amount = Some(AMOUNT_BOTH_SIDES.to_string());
        }

        if !errors.is_empty() {
            field_errors.insert(index, errors);
        }
    }

    let is_balanced = !totals_overflowed && amount::within_tolerance(total_debit, total_credit);
    let balance_error = (!is_balanced).then(|| BalanceError::new(total_debit, total_credit));

    ValidationResult {
        field_errors,
        entry_errors,
        total_debit,
        total_credit,
        totals_overflowed,
        is_balanced,
        balance_error,
    }
}

/// Add `amount` to `total`, clamping at the representable bounds.
/// Returns false when clamping was needed.
fn accumulate(total: &mut Decimal, amount: Decimal) -> bool {
    match total.checked_add(amount) {
        Some(sum) => {
            *total = sum;
            true
        }
        None => {
            *total = if amount.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            };
            false
        }
    }
}
