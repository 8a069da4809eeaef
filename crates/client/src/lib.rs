//! `ledgerdesk-client`
//!
//! **Responsibility:** typed access to the accounting REST API.
//!
//! The API is the authority for accounts and stored entries; this crate only
//! moves data. Drafts are validated by `ledgerdesk-accounting` before anything
//! is sent, and locked entries are refused before a request is made.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
