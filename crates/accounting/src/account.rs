//! Chart of accounts: the accounts a journal line may reference.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ledgerdesk_core::{AccountId, DomainError, Entity};

/// High-level account kind (determines normal balance side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

/// Side on which an account's balance normally grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalBalance {
    Debit,
    Credit,
}

impl AccountKind {
    pub fn normal_balance(self) -> NormalBalance {
        match self {
            AccountKind::Asset | AccountKind::Expense => NormalBalance::Debit,
            AccountKind::Liability | AccountKind::Equity | AccountKind::Revenue => {
                NormalBalance::Credit
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Asset => "asset",
            AccountKind::Liability => "liability",
            AccountKind::Equity => "equity",
            AccountKind::Revenue => "revenue",
            AccountKind::Expense => "expense",
        }
    }
}

impl core::str::FromStr for AccountKind {
    type Err = DomainError;

    /// Case-insensitive; the backend has sent both `"Asset"` and `"asset"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" | "assets" => Ok(AccountKind::Asset),
            "liability" | "liabilities" => Ok(AccountKind::Liability),
            "equity" => Ok(AccountKind::Equity),
            "revenue" | "income" => Ok(AccountKind::Revenue),
            "expense" | "expenses" => Ok(AccountKind::Expense),
            other => Err(DomainError::validation(format!(
                "unknown account type {other:?}; expected one of: asset, liability, equity, revenue, expense"
            ))),
        }
    }
}

impl TryFrom<String> for AccountKind {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl core::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the chart of accounts, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub account_code: String, // e.g. "1000"
    pub account_name: String, // e.g. "Cash"
    pub account_type: AccountKind,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Account {
    /// Label used in account pickers, e.g. `"1000 - Cash"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.account_code, self.account_name)
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// In-memory chart of accounts, kept sorted by account code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
}

impl ChartOfAccounts {
    pub fn new(mut accounts: Vec<Account>) -> Self {
        accounts.sort_by(|a, b| {
            a.account_code
                .cmp(&b.account_code)
                .then_with(|| a.id.cmp(&b.id))
        });
        Self { accounts }
    }

    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts offered when picking a journal line's account.
    pub fn selectable(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|a| a.is_active)
    }

    pub fn find(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Accounts grouped by kind, in balance-sheet order (assets first).
    pub fn by_kind(&self) -> BTreeMap<AccountKind, Vec<&Account>> {
        let mut groups: BTreeMap<AccountKind, Vec<&Account>> = BTreeMap::new();
        for account in &self.accounts {
            groups.entry(account.account_type).or_default().push(account);
        }
        groups
    }

    /// Case-insensitive match on code or name.
    pub fn search<'a>(&'a self, term: &str) -> Vec<&'a Account> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.accounts.iter().collect();
        }
        self.accounts
            .iter()
            .filter(|a| {
                a.account_code.to_lowercase().contains(&needle)
                    || a.account_name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account(id: i64, code: &str, name: &str, kind: AccountKind, active: bool) -> Account {
        Account {
            id: AccountId::new(id),
            account_code: code.to_string(),
            account_name: name.to_string(),
            account_type: kind,
            is_active: active,
        }
    }

    fn sample_chart() -> ChartOfAccounts {
        ChartOfAccounts::new(vec![
            test_account(3, "4000", "Sales", AccountKind::Revenue, true),
            test_account(1, "1000", "Cash", AccountKind::Asset, true),
            test_account(4, "6100", "Rent", AccountKind::Expense, true),
            test_account(2, "1200", "Old Bank", AccountKind::Asset, false),
            test_account(5, "2000", "Payables", AccountKind::Liability, true),
        ])
    }

    #[test]
    fn chart_is_sorted_by_code() {
        let chart = sample_chart();
        let codes: Vec<&str> = chart.all().iter().map(|a| a.account_code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "1200", "2000", "4000", "6100"]);
    }

    #[test]
    fn inactive_accounts_are_not_selectable() {
        let chart = sample_chart();
        assert!(chart.selectable().all(|a| a.is_active));
        assert_eq!(chart.selectable().count(), 4);
        // Still resolvable for entries that already reference it.
        assert_eq!(chart.find(AccountId::new(2)).unwrap().account_name, "Old Bank");
    }

    #[test]
    fn groups_follow_balance_sheet_order() {
        let chart = sample_chart();
        let groups = chart.by_kind();
        let kinds: Vec<AccountKind> = groups.keys().copied().collect();
        assert_eq!(
            kinds,
            vec![
                AccountKind::Asset,
                AccountKind::Liability,
                AccountKind::Revenue,
                AccountKind::Expense
            ]
        );
        assert_eq!(groups[&AccountKind::Asset].len(), 2);
    }

    #[test]
    fn search_matches_code_or_name() {
        let chart = sample_chart();
        assert_eq!(chart.search("rent")[0].account_code, "6100");
        assert_eq!(chart.search("12")[0].account_name, "Old Bank");
        assert_eq!(chart.search("  ").len(), 5);
    }

    #[test]
    fn normal_balance_side() {
        assert_eq!(AccountKind::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountKind::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountKind::Revenue.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn deserializes_backend_account() {
        let json = r#"{"id":9,"accountCode":"1000","accountName":"Cash","accountType":"Asset"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, AccountId::new(9));
        assert_eq!(account.account_type, AccountKind::Asset);
        assert!(account.is_active);
        assert_eq!(account.label(), "1000 - Cash");
    }

    #[test]
    fn unknown_account_type_is_rejected() {
        let json = r#"{"id":9,"accountCode":"1000","accountName":"Cash","accountType":"gizmo"}"#;
        assert!(serde_json::from_str::<Account>(json).is_err());
    }
}
