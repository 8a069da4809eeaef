//! HTTP client for the accounting API.

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use ledgerdesk_accounting::{
    Account, ChartOfAccounts, EntryAction, PersistedJournalEntry, SubmissionPayload,
};
use ledgerdesk_core::{BusinessAccountId, JournalEntryId};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Header selecting the business account a request acts on.
pub const BUSINESS_ACCOUNT_HEADER: &str = "X-Business-Account-Id";

/// Explicit handle on the accounting API: base URL, credential and current
/// business account travel with the value instead of living in globals.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

#[derive(Debug, Deserialize)]
struct Items<T> {
    items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn business_account(&self) -> Option<BusinessAccountId> {
        self.config.business_account
    }

    /// Client acting on another business account. `self` is unchanged.
    pub fn for_business_account(&self, id: BusinessAccountId) -> Self {
        tracing::info!(business_account = %id, "switching business account");
        Self {
            http: self.http.clone(),
            config: self.config.clone().with_business_account(id),
        }
    }

    /// Check connectivity by hitting the health endpoint.
    pub async fn check_connectivity(&self) -> bool {
        match self.request(Method::GET, "/health").send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn list_accounts(&self) -> ClientResult<Vec<Account>> {
        let items: Items<Account> = self.send(self.request(Method::GET, "/accounts")).await?;
        Ok(items.items)
    }

    pub async fn chart_of_accounts(&self) -> ClientResult<ChartOfAccounts> {
        Ok(ChartOfAccounts::new(self.list_accounts().await?))
    }

    pub async fn list_entries(&self) -> ClientResult<Vec<PersistedJournalEntry>> {
        let items: Items<PersistedJournalEntry> =
            self.send(self.request(Method::GET, "/journal-entries")).await?;
        Ok(items.items)
    }

    pub async fn get_entry(&self, id: JournalEntryId) -> ClientResult<PersistedJournalEntry> {
        self.send(self.request(Method::GET, &format!("/journal-entries/{id}")))
            .await
    }

    pub async fn create_entry(
        &self,
        payload: &SubmissionPayload,
    ) -> ClientResult<PersistedJournalEntry> {
        let req = self.request(Method::POST, "/journal-entries").json(payload);
        self.send(req).await
    }

    /// Replace a stored entry. Locked entries are refused without a request.
    pub async fn update_entry(
        &self,
        entry: &PersistedJournalEntry,
        payload: &SubmissionPayload,
    ) -> ClientResult<PersistedJournalEntry> {
        Self::ensure_editable(entry, EntryAction::Edit)?;
        let req = self
            .request(Method::PUT, &format!("/journal-entries/{}", entry.id))
            .json(payload);
        self.send(req).await
    }

    /// Delete a stored entry. Locked entries are refused without a request.
    pub async fn delete_entry(&self, entry: &PersistedJournalEntry) -> ClientResult<()> {
        Self::ensure_editable(entry, EntryAction::Delete)?;
        let resp = self
            .request(Method::DELETE, &format!("/journal-entries/{}", entry.id))
            .send()
            .await?;
        Self::check_status(resp).await.map(|_| ())
    }

    fn ensure_editable(entry: &PersistedJournalEntry, action: EntryAction) -> ClientResult<()> {
        entry.ensure_editable(action).map_err(|e| {
            tracing::warn!(entry = %entry.entry_number, error = %e, "refusing write on locked entry");
            ClientError::from(e)
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "accounting API request");
        let url = format!("{}{}", self.config.base_url, path);
        let mut req = self.http.request(method, url);

        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }
        if let Some(id) = self.config.business_account {
            req = req.header(BUSINESS_ACCOUNT_HEADER, id.to_string());
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let resp = Self::check_status(req.send().await?).await?;
        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn check_status(resp: Response) -> ClientResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body.message.unwrap_or_else(|| {
            if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text.clone()
            }
        });

        tracing::warn!(status = status.as_u16(), code = ?body.error, %message, "accounting API error");
        Err(ClientError::Api {
            status: status.as_u16(),
            code: body.error,
            message,
        })
    }
}
