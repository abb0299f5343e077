//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! so every pooled connection sees the same schema, constraints and indexes.

#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;
use tessera_core::types::{Account, AccountId, NewAccount};

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = tessera_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        tessera_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create an account with a placeholder hash
pub async fn create_test_account(pool: &SqlitePool, name: &str, email: &str) -> Account {
    tessera_storage::accounts::create(pool, NewAccount::new(name, email, "$2b$04$placeholder"))
        .await
        .expect("Failed to create test account")
}

/// Count credential rows referencing an account
pub async fn credential_count(pool: &SqlitePool, account_id: AccountId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM credentials WHERE account_id = ?")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count credentials")
}

/// Count all account rows, deleted or not
pub async fn account_row_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await
        .expect("Failed to count accounts")
}
