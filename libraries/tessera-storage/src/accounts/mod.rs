//! Account and credential queries
//!
//! Timestamps are stored as milliseconds since the Unix epoch.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use tessera_core::{
    error::Result,
    types::{
        Account, AccountFilter, AccountId, Credential, NewAccount, Pagination,
        DELETED_ACCOUNT_NAME,
    },
    TesseraError,
};

const SELECT_ACCOUNTS: &str = r#"
    SELECT
        a.id, a.name, a.email, a.is_admin, a.email_confirmed, a.deleted,
        a.created_at, a.updated_at,
        c.account_id AS credential_account_id,
        c.password_hash,
        c.created_at AS credential_created_at,
        c.updated_at AS credential_updated_at
    FROM accounts a
    LEFT JOIN credentials c ON c.account_id = a.id
"#;

/// List accounts matching `filter`, ordered by id
///
/// Empty string predicates are treated as unset.
pub async fn find_many(
    pool: &SqlitePool,
    filter: &AccountFilter,
    page: Pagination,
    include_credential: bool,
) -> Result<Vec<Account>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_ACCOUNTS);
    query.push(" WHERE 1 = 1");

    if let Some(id) = filter.id {
        query.push(" AND a.id = ").push_bind(id);
    }
    if let Some(name) = filter.name.as_deref().filter(|s| !s.is_empty()) {
        query
            .push(" AND instr(a.name, ")
            .push_bind(name.to_string())
            .push(") > 0");
    }
    if let Some(email) = filter.email.as_deref().filter(|s| !s.is_empty()) {
        query
            .push(" AND instr(a.email, ")
            .push_bind(email.to_string())
            .push(") > 0");
    }
    if let Some(since) = filter.updated_since {
        query
            .push(" AND a.updated_at >= ")
            .push_bind(since.timestamp_millis());
    }

    query
        .push(" ORDER BY a.id LIMIT ")
        .push_bind(i64::from(page.limit))
        .push(" OFFSET ")
        .push_bind(i64::from(page.offset));

    let rows = query.build().fetch_all(pool).await?;

    rows.iter()
        .map(|row| account_from_row(row, include_credential))
        .collect()
}

/// Get account by ID (including soft-deleted accounts)
pub async fn get_by_id(pool: &SqlitePool, id: AccountId) -> Result<Option<Account>> {
    let row = sqlx::query(&format!("{SELECT_ACCOUNTS} WHERE a.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(|row| account_from_row(&row, false)).transpose()
}

/// Get the active account owning `email`
pub async fn get_by_email(
    pool: &SqlitePool,
    email: &str,
    include_credential: bool,
) -> Result<Option<Account>> {
    let row = sqlx::query(&format!(
        "{SELECT_ACCOUNTS} WHERE a.email = ? AND a.deleted = 0"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(|row| account_from_row(&row, include_credential))
        .transpose()
}

/// Create an account and its credential in one transaction
pub async fn create(pool: &SqlitePool, account: NewAccount) -> Result<Account> {
    let now = Utc::now().timestamp_millis();
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO accounts (name, email, is_admin, email_confirmed, deleted, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?)
        "#,
    )
    .bind(&account.name)
    .bind(&account.email)
    .bind(account.is_admin)
    .bind(account.email_confirmed)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| match TesseraError::from(e) {
        TesseraError::Duplicate(_) => {
            TesseraError::duplicate("an active account already uses this email")
        }
        other => other,
    })?;

    let id = AccountId::new(result.last_insert_rowid());

    sqlx::query(
        "INSERT INTO credentials (account_id, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&account.password_hash)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or(TesseraError::AccountNotFound(id))
}

/// Rename an active account
pub async fn update_name(pool: &SqlitePool, id: AccountId, name: &str) -> Result<Account> {
    let result =
        sqlx::query("UPDATE accounts SET name = ?, updated_at = ? WHERE id = ? AND deleted = 0")
            .bind(name)
            .bind(Utc::now().timestamp_millis())
            .bind(id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(TesseraError::AccountNotFound(id));
    }

    get_by_id(pool, id)
        .await?
        .ok_or(TesseraError::AccountNotFound(id))
}

/// Soft-delete an account and remove its credential in one transaction
///
/// Fails with `AccountNotFound` when the account is missing or already deleted,
/// leaving the database untouched.
pub async fn soft_delete(pool: &SqlitePool, id: AccountId) -> Result<Account> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET deleted = 1, name = ?, email = NULL, updated_at = ?
        WHERE id = ? AND deleted = 0
        "#,
    )
    .bind(DELETED_ACCOUNT_NAME)
    .bind(Utc::now().timestamp_millis())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        // Dropping the transaction rolls it back
        return Err(TesseraError::AccountNotFound(id));
    }

    sqlx::query("DELETE FROM credentials WHERE account_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or(TesseraError::AccountNotFound(id))
}

/// Create the account, or rename the active account already owning its email
///
/// Used for seeding, which must be safe to run repeatedly.
pub async fn upsert_by_email(pool: &SqlitePool, account: NewAccount) -> Result<Account> {
    match get_by_email(pool, &account.email, false).await? {
        Some(existing) if existing.name == account.name => Ok(existing),
        Some(existing) => update_name(pool, existing.id, &account.name).await,
        None => create(pool, account).await,
    }
}

/// Check if an account has a credential row
pub async fn has_credential(pool: &SqlitePool, id: AccountId) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM credentials WHERE account_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

fn account_from_row(row: &SqliteRow, include_credential: bool) -> Result<Account> {
    let credential = if include_credential {
        match row.try_get::<Option<AccountId>, _>("credential_account_id")? {
            Some(account_id) => Some(Credential {
                account_id,
                password_hash: row.try_get("password_hash")?,
                created_at: timestamp(row, "credential_created_at")?,
                updated_at: timestamp(row, "credential_updated_at")?,
            }),
            None => None,
        }
    } else {
        None
    };

    Ok(Account {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        is_admin: row.try_get::<i64, _>("is_admin")? != 0,
        email_confirmed: row.try_get::<i64, _>("email_confirmed")? != 0,
        deleted: row.try_get::<i64, _>("deleted")? != 0,
        created_at: timestamp(row, "created_at")?,
        updated_at: timestamp(row, "updated_at")?,
        credential,
    })
}

fn timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let millis: i64 = row.try_get(column)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| TesseraError::storage(format!("Invalid timestamp in {column}")))
}
