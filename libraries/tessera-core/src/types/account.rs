/// Account domain types
use super::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name every soft-deleted account is reset to
pub const DELETED_ACCOUNT_NAME: &str = "(deleted)";

/// User account
///
/// Accounts are never physically removed. A soft-deleted account keeps its id
/// and timestamps but loses its email, its name and its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier
    pub id: AccountId,

    /// Display name
    pub name: String,

    /// Login email, `None` once the account is soft-deleted
    pub email: Option<String>,

    /// Administrator role flag
    pub is_admin: bool,

    /// Whether the email address has been confirmed
    pub email_confirmed: bool,

    /// Soft-delete flag
    pub deleted: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,

    /// Credential reference, only populated when explicitly requested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub credential: Option<Credential>,
}

impl Account {
    /// Whether the account has not been soft-deleted
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

/// Secret material for one account
///
/// The hash is never serialized; API consumers only ever see that a
/// credential exists and when it was last changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Owning account
    pub account_id: AccountId,

    /// bcrypt digest of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last change timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data required to persist a new account together with its credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Already-hashed password
    pub password_hash: String,
    /// Administrator role flag
    pub is_admin: bool,
    /// Whether the email address is already confirmed
    pub email_confirmed: bool,
}

impl NewAccount {
    /// A standard, unconfirmed account
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_admin: false,
            email_confirmed: false,
        }
    }

    /// Grant the administrator role
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    /// Mark the email as confirmed
    pub fn confirmed(mut self) -> Self {
        self.email_confirmed = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new(1),
            name: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
            is_admin: false,
            email_confirmed: true,
            deleted: false,
            created_at: now,
            updated_at: now,
            credential: Some(Credential {
                account_id: AccountId::new(1),
                password_hash: "$2b$04$secret".to_string(),
                created_at: now,
                updated_at: now,
            }),
        }
    }

    #[test]
    fn credential_hash_is_never_serialized() {
        let json = serde_json::to_value(sample_account()).unwrap();
        assert!(json["credential"].is_object());
        assert!(json["credential"].get("password_hash").is_none());
        assert_eq!(json["credential"]["account_id"], 1);
    }

    #[test]
    fn credential_omitted_when_not_loaded() {
        let mut account = sample_account();
        account.credential = None;
        let json = serde_json::to_value(account).unwrap();
        assert!(json.get("credential").is_none());
    }

    #[test]
    fn new_account_builders_set_flags() {
        let account = NewAccount::new("Admin", "admin@example.com", "hash")
            .admin()
            .confirmed();
        assert!(account.is_admin);
        assert!(account.email_confirmed);

        let plain = NewAccount::new("User", "user@example.com", "hash");
        assert!(!plain.is_admin);
        assert!(!plain.email_confirmed);
    }
}
