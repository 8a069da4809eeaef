//! Client configuration, read from the environment.

use std::time::Duration;

use ledgerdesk_core::BusinessAccountId;

use crate::error::{ClientError, ClientResult};

pub const API_URL_ENV: &str = "LEDGERDESK_API_URL";
pub const API_TOKEN_ENV: &str = "LEDGERDESK_API_TOKEN";
pub const BUSINESS_ACCOUNT_ENV: &str = "LEDGERDESK_BUSINESS_ACCOUNT";
pub const TIMEOUT_ENV: &str = "LEDGERDESK_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a request needs that used to live in ambient UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash, e.g. `https://books.example.com/api`.
    pub base_url: String,
    /// Bearer credential.
    pub token: Option<String>,
    /// Business account whose books are read and written.
    pub business_account: Option<BusinessAccountId>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: None,
            business_account: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_business_account(mut self, id: BusinessAccountId) -> Self {
        self.business_account = Some(id);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_url = get(API_URL_ENV)
            .ok_or_else(|| ClientError::config(format!("{API_URL_ENV} is not set")))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::config(format!(
                "{API_URL_ENV} must be an http(s) URL, got {base_url:?}"
            )));
        }
        let mut config = Self::new(base_url);

        if let Some(token) = get(API_TOKEN_ENV) {
            config = config.with_token(token);
        }

        if let Some(raw) = get(BUSINESS_ACCOUNT_ENV) {
            let id = raw
                .parse::<BusinessAccountId>()
                .map_err(|e| ClientError::config(format!("{BUSINESS_ACCOUNT_ENV}: {e}")))?;
            config = config.with_business_account(id);
        }

        if let Some(raw) = get(TIMEOUT_ENV) {
            let secs = raw.parse::<u64>().map_err(|e| {
                ClientError::config(format!("{TIMEOUT_ENV} must be whole seconds: {e}"))
            })?;
            if secs == 0 {
                return Err(ClientError::config(format!("{TIMEOUT_ENV} must be positive")));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
