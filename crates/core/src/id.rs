//! Strongly-typed identifiers used across the domain.
//!
//! The accounting backend keys every record with an integer primary key, so all
//! identifiers wrap an `i64` and serialize as a bare JSON number.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a ledger account (chart of accounts row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

/// Identifier of a persisted journal entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JournalEntryId(i64);

/// Identifier of the business account whose books are being edited.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessAccountId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(AccountId, "AccountId");
impl_int_newtype!(JournalEntryId, "JournalEntryId");
impl_int_newtype!(BusinessAccountId, "BusinessAccountId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_integer_ids() {
        let id: AccountId = " 42 ".parse().unwrap();
        assert_eq!(id, AccountId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_integer_ids_with_type_name() {
        let err = "abc".parse::<JournalEntryId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("JournalEntryId")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&BusinessAccountId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: BusinessAccountId = serde_json::from_str("7").unwrap();
        assert_eq!(back.get(), 7);
    }
}
