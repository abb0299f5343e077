use crate::accounts;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tessera_core::{error::Result, store::AccountStore, types::*};

/// Account store backed by a `SQLite` pool
#[derive(Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn find_many(
        &self,
        filter: &AccountFilter,
        page: Pagination,
        include_credential: bool,
    ) -> Result<Vec<Account>> {
        accounts::find_many(&self.pool, filter, page, include_credential).await
    }

    async fn find_one(&self, id: AccountId) -> Result<Option<Account>> {
        accounts::get_by_id(&self.pool, id).await
    }

    async fn find_by_email(
        &self,
        email: &str,
        include_credential: bool,
    ) -> Result<Option<Account>> {
        accounts::get_by_email(&self.pool, email, include_credential).await
    }

    async fn create_with_credential(&self, account: NewAccount) -> Result<Account> {
        accounts::create(&self.pool, account).await
    }

    async fn update_name(&self, id: AccountId, name: &str) -> Result<Account> {
        accounts::update_name(&self.pool, id, name).await
    }

    async fn soft_delete_with_credential(&self, id: AccountId) -> Result<Account> {
        accounts::soft_delete(&self.pool, id).await
    }
}
