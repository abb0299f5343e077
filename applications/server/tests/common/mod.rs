//! Common test utilities and fixtures
//!
//! Every test gets its own file-backed SQLite database in a temp dir and a
//! directory wired with the cheapest bcrypt cost.

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;
use tessera_core::{Account, AccountStore, NewAccount};
use tessera_server::{
    services::{
        password::MIN_BCRYPT_COST, AccountDirectory, Caller, PasswordCodec, TokenService,
    },
    state::AppState,
};
use tessera_storage::SqliteAccountStore;

pub const TEST_SECRET: &str = "test-secret-key";

/// Test user credentials
pub mod fixtures {
    pub const ADMIN_NAME: &str = "Admin";
    pub const ADMIN_EMAIL: &str = "admin@x.com";
    pub const USER_NAME: &str = "James";
    pub const USER_EMAIL: &str = "james@yahoo.com";
    pub const PASSWORD: &str = "Password@123456";
}

pub struct TestContext {
    pub store: SqliteAccountStore,
    pub passwords: PasswordCodec,
    pub state: AppState,
    _temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = tessera_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        tessera_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let store = SqliteAccountStore::new(pool);
        let passwords = PasswordCodec::new(MIN_BCRYPT_COST).expect("codec");
        let tokens = TokenService::new(TEST_SECRET, chrono::Duration::hours(1)).expect("tokens");

        let directory = AccountDirectory::new(Arc::new(store.clone()), passwords.clone(), tokens);

        Self {
            store,
            passwords,
            state: AppState::new(Arc::new(directory)),
            _temp_dir: temp_dir,
        }
    }

    pub fn directory(&self) -> &AccountDirectory {
        &self.state.directory
    }

    /// Persist an account with a real hash of `password`, bypassing the policy
    pub async fn insert_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> Account {
        let hash = self.passwords.hash(password).expect("hash");
        let mut new_account = NewAccount::new(name, email, hash);
        if is_admin {
            new_account = new_account.admin();
        }

        self.store
            .create_with_credential(new_account)
            .await
            .expect("Failed to create test account")
    }

    /// The seeded administrator and a standard user, as callers
    pub async fn admin_and_user(&self) -> (Caller, Caller) {
        let admin = self
            .insert_account(fixtures::ADMIN_NAME, fixtures::ADMIN_EMAIL, fixtures::PASSWORD, true)
            .await;
        let user = self
            .insert_account(fixtures::USER_NAME, fixtures::USER_EMAIL, fixtures::PASSWORD, false)
            .await;

        (Caller::from_account(&admin), Caller::from_account(&user))
    }

    pub async fn has_credential(&self, account: &Account) -> bool {
        tessera_storage::accounts::has_credential(self.store.pool(), account.id)
            .await
            .expect("credential lookup")
    }

    pub async fn find_active(&self, email: &str) -> Option<Account> {
        self.store
            .find_by_email(email, false)
            .await
            .expect("email lookup")
    }
}
