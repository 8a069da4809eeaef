//! `ledgerdesk` command-line entry points.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use ledgerdesk_accounting::{JournalEntryDraft, PersistedJournalEntry};

use crate::client::ApiClient;

#[derive(Parser, Debug)]
#[command(name = "ledgerdesk")]
#[command(about = "Validate and submit double-entry journal drafts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the validation result; exits 1 if the draft is invalid
    Validate {
        /// Draft JSON file
        path: PathBuf,
    },

    /// Validate, then create the entry via the accounting API
    Submit {
        /// Draft JSON file
        path: PathBuf,
    },
}

pub fn load_draft(path: impl AsRef<Path>) -> anyhow::Result<JournalEntryDraft> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a journal draft", path.display()))
}

/// JSON report for `validate`: the result plus the submit gate.
pub fn validation_report(draft: &JournalEntryDraft) -> Value {
    let result = draft.validate();
    json!({
        "isValid": result.is_valid(),
        "problems": result.problems(),
        "result": result,
    })
}

/// Validate and create the entry. Nothing is sent for an invalid draft.
pub async fn submit(client: &ApiClient, draft: &JournalEntryDraft) -> anyhow::Result<PersistedJournalEntry> {
    let payload = draft.to_submission_payload()?;
    let entry = client
        .create_entry(&payload)
        .await
        .context("accounting API rejected the journal entry")?;
    tracing::info!(entry = %entry.entry_number, id = %entry.id, "journal entry created");
    Ok(entry)
}
