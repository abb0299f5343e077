/// Shared application state
use crate::{
    config::ServerConfig,
    error::Result,
    services::{AccountDirectory, PasswordCodec, TokenService},
};
use std::sync::Arc;
use tessera_storage::SqliteAccountStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<AccountDirectory>,
}

impl AppState {
    pub fn new(directory: Arc<AccountDirectory>) -> Self {
        Self { directory }
    }

    /// Wire the directory from validated configuration and an open store
    pub fn from_config(config: &ServerConfig, store: SqliteAccountStore) -> Result<Self> {
        let passwords = PasswordCodec::new(config.auth.bcrypt_cost)?;
        let tokens = TokenService::new(
            &config.auth.jwt_secret,
            chrono::Duration::seconds(config.auth.token_ttl_secs),
        )?;

        let directory = AccountDirectory::new(Arc::new(store), passwords, tokens);
        Ok(Self::new(Arc::new(directory)))
    }
}
