//! Account directory
//!
//! Orchestrates the account flows: every operation is gated by the access
//! policy, then validated, then handed to the [`AccountStore`].

use crate::error::{Result, ServerError};
use crate::services::password::{validate_password_strength, PasswordCodec};
use crate::services::policy::{authorize, Action, Caller, Scope};
use crate::services::token::{Claims, TokenService};
use serde::Deserialize;
use std::sync::Arc;
use tessera_core::{Account, AccountFilter, AccountId, AccountStore, NewAccount, Pagination};

/// Payload for creating an account
///
/// Missing fields deserialize as empty so that the access check still runs
/// before any field is validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Listing request as received from a caller
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub filter: AccountFilter,
    pub page: Pagination,
    pub include_credential: bool,
}

pub struct AccountDirectory {
    store: Arc<dyn AccountStore>,
    passwords: PasswordCodec,
    tokens: TokenService,
}

impl AccountDirectory {
    pub fn new(store: Arc<dyn AccountStore>, passwords: PasswordCodec, tokens: TokenService) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    /// Check an email/password pair
    ///
    /// Unknown email and wrong password both yield `Ok(false)`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<bool> {
        Ok(self.check_credentials(email, password).await?.is_some())
    }

    /// Check credentials and issue a session token for the account
    pub async fn authenticate_and_issue_token(&self, email: &str, password: &str) -> Result<String> {
        let account = self
            .check_credentials(email, password)
            .await?
            .ok_or(ServerError::Unauthenticated)?;

        let email = account.email.as_deref().unwrap_or(email);
        let token = self.tokens.issue(account.id, email)?;
        tracing::info!(account_id = %account.id, "Issued session token");
        Ok(token)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        self.tokens.validate(token)
    }

    /// Turn verified claims into a caller with a role
    ///
    /// The subject must still exist and be active.
    pub async fn resolve_caller(&self, claims: &Claims) -> Result<Caller> {
        match self.store.find_one(claims.id).await? {
            Some(account) if account.is_active() => Ok(Caller::from_account(&account)),
            _ => {
                tracing::warn!(account_id = %claims.id, "Token subject is missing or deleted");
                Err(ServerError::InvalidToken)
            }
        }
    }

    pub async fn find(&self, caller: &Caller, query: FindQuery) -> Result<Vec<Account>> {
        match authorize(caller, Action::List)? {
            Scope::Any => Ok(self
                .store
                .find_many(&query.filter, query.page, query.include_credential)
                .await?),
            Scope::OwnRecord(id) => {
                let own = self.store.find_one(id).await?;
                Ok(own.into_iter().filter(Account::is_active).collect())
            }
        }
    }

    pub async fn find_one(&self, caller: &Caller, id: AccountId) -> Result<Account> {
        authorize(caller, Action::Read(id))?;

        self.store
            .find_one(id)
            .await?
            .filter(Account::is_active)
            .ok_or_else(|| ServerError::NotFound(format!("Account {id} not found")))
    }

    pub async fn create(&self, caller: &Caller, input: CreateAccount) -> Result<Account> {
        authorize(caller, Action::Create)?;

        let new_account = prepare_account(&self.passwords, &input)?;
        let account = self.store.create_with_credential(new_account).await?;
        tracing::info!(
            account_id = %account.id,
            created_by = %caller.id,
            "Account created"
        );
        Ok(account)
    }

    pub async fn update(&self, caller: &Caller, id: AccountId, name: &str) -> Result<Account> {
        authorize(caller, Action::Update(id))?;
        let name = validate_name(name)?;

        let account = self.store.update_name(id, name).await?;
        tracing::info!(account_id = %id, updated_by = %caller.id, "Account renamed");
        Ok(account)
    }

    pub async fn delete(&self, caller: &Caller, id: AccountId) -> Result<Account> {
        authorize(caller, Action::Delete(id))?;

        let account = self.store.soft_delete_with_credential(id).await?;
        tracing::info!(account_id = %id, deleted_by = %caller.id, "Account soft-deleted");
        Ok(account)
    }

    async fn check_credentials(&self, email: &str, password: &str) -> Result<Option<Account>> {
        let account = self.store.find_by_email(email, true).await?;

        let digest = account
            .as_ref()
            .and_then(|a| a.credential.as_ref())
            .map(|c| c.password_hash.as_str());

        let matched = match digest {
            Some(digest) => self.passwords.verify(password, digest),
            None => self.passwords.verify_decoy(password),
        };

        if matched {
            Ok(account)
        } else {
            tracing::debug!("Credential check failed");
            Ok(None)
        }
    }
}

/// Validate a create payload and hash its password
///
/// Produces a standard account; callers may upgrade it with
/// [`NewAccount::admin`] before persisting.
pub fn prepare_account(passwords: &PasswordCodec, input: &CreateAccount) -> Result<NewAccount> {
    let name = validate_name(&input.name)?;
    let email = validate_email(&input.email)?;
    validate_password_strength(&input.password)?;

    let hash = passwords.hash(&input.password)?;
    Ok(NewAccount::new(name, email, hash))
}

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServerError::validation("Name must not be empty"));
    }
    Ok(name)
}

fn validate_email(email: &str) -> Result<&str> {
    let email = email.trim();
    let plausible = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if plausible {
        Ok(email)
    } else {
        Err(ServerError::validation("Email must be a valid email address"))
    }
}
