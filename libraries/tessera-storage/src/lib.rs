//! Tessera Storage
//!
//! `SQLite` persistence for accounts and their credentials.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: the `accounts` module owns its queries
//! - **Atomic pairs**: account + credential writes share one transaction
//! - **Soft delete**: deletion is an explicit anonymising update, never a `DELETE`
//!
//! # Example
//!
//! ```rust,no_run
//! use tessera_storage::{create_pool, run_migrations, SqliteAccountStore};
//! use tessera_core::{AccountFilter, AccountStore, Pagination};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://tessera.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteAccountStore::new(pool);
//! let accounts = store
//!     .find_many(&AccountFilter::default(), Pagination::default(), false)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod accounts;

pub use context::SqliteAccountStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://tessera.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "creating sqlite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("sqlite pool ready");

    Ok(pool)
}
