//! Persistence contract for accounts and their credentials

use crate::error::Result;
use crate::types::{Account, AccountFilter, AccountId, NewAccount, Pagination};
use async_trait::async_trait;

/// Account store
///
/// Implementers own transaction boundaries. Operations documented as atomic
/// must either fully apply to both the account and its credential or leave
/// both untouched.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// List accounts matching `filter`, ordered by id, within `page`.
    ///
    /// Soft-deleted accounts are included; callers narrow further if needed.
    async fn find_many(
        &self,
        filter: &AccountFilter,
        page: Pagination,
        include_credential: bool,
    ) -> Result<Vec<Account>>;

    /// Get an account by id, soft-deleted or not
    async fn find_one(&self, id: AccountId) -> Result<Option<Account>>;

    /// Get the active account owning `email`
    async fn find_by_email(&self, email: &str, include_credential: bool)
        -> Result<Option<Account>>;

    /// Create an account and its credential atomically.
    ///
    /// # Errors
    /// Returns `TesseraError::Duplicate` if an active account already owns the email.
    async fn create_with_credential(&self, account: NewAccount) -> Result<Account>;

    /// Rename an active account.
    ///
    /// # Errors
    /// Returns `TesseraError::AccountNotFound` if the account is missing or soft-deleted.
    async fn update_name(&self, id: AccountId, name: &str) -> Result<Account>;

    /// Soft-delete an account and drop its credential atomically.
    ///
    /// # Errors
    /// Returns `TesseraError::AccountNotFound` if the account is missing or
    /// already soft-deleted.
    async fn soft_delete_with_credential(&self, id: AccountId) -> Result<Account>;

    /// Convenience: load an account with its credential attached
    async fn find_one_with_credential(&self, id: AccountId) -> Result<Option<Account>> {
        let accounts = self
            .find_many(&AccountFilter::by_id(id), Pagination::new(Some(1), None), true)
            .await?;
        Ok(accounts.into_iter().next())
    }
}
