/// Idempotent seeding of the default accounts
use crate::{error::Result, services::PasswordCodec};
use tessera_core::{Account, NewAccount};
use tessera_storage::{accounts, SqliteAccountStore};

pub const SEED_ADMIN_EMAIL: &str = "admin@gmail.com";
pub const SEED_USER_EMAIL: &str = "user@gmail.com";

/// Ensure an `Admin` administrator and a `User` standard account exist
///
/// Both are email-confirmed. Running this again only restores the names of
/// the existing rows instead of creating new ones.
pub async fn seed_accounts(
    store: &SqliteAccountStore,
    passwords: &PasswordCodec,
    password: &str,
) -> Result<Vec<Account>> {
    crate::services::password::validate_password_strength(password)?;

    let seeds = [
        NewAccount::new("Admin", SEED_ADMIN_EMAIL, passwords.hash(password)?)
            .admin()
            .confirmed(),
        NewAccount::new("User", SEED_USER_EMAIL, passwords.hash(password)?).confirmed(),
    ];

    let mut seeded = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let account = accounts::upsert_by_email(store.pool(), seed).await?;
        tracing::info!(account_id = %account.id, name = %account.name, "Seeded account");
        seeded.push(account);
    }

    Ok(seeded)
}
