/// Query types for listing accounts
use super::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for account listings
pub const DEFAULT_PAGE_LIMIT: u32 = 15;

/// Predicates applied when listing accounts
///
/// Every field is optional; unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFilter {
    /// Exact id match
    pub id: Option<AccountId>,
    /// Case-sensitive substring of the name
    pub name: Option<String>,
    /// Case-sensitive substring of the email
    pub email: Option<String>,
    /// Only accounts updated at or after this instant
    pub updated_since: Option<DateTime<Utc>>,
}

impl AccountFilter {
    /// Filter matching exactly one id
    pub fn by_id(id: AccountId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Add a name substring predicate
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an email substring predicate
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Add an updated-since predicate
    pub fn updated_since(mut self, since: DateTime<Utc>) -> Self {
        self.updated_since = Some(since);
        self
    }
}

/// Limit/offset window over an ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records returned
    pub limit: u32,
    /// Number of records skipped
    pub offset: u32,
}

impl Pagination {
    /// Build a window, falling back to the defaults for unset values
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}
