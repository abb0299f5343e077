/// Core error types for Tessera
use crate::types::AccountId;
use thiserror::Error;

/// Result type alias using `TesseraError`
pub type Result<T> = std::result::Result<T, TesseraError>;

/// Core error type for Tessera
#[derive(Error, Debug)]
pub enum TesseraError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Account missing or already soft-deleted
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Duplicate entry (e.g. an active account already owns the email)
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl TesseraError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Whether this error means the target record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::AccountNotFound(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for TesseraError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Row", "unknown"),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                Self::Duplicate(db_err.message().to_string())
            }
            other => Self::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_not_found_counts_as_not_found() {
        assert!(TesseraError::AccountNotFound(AccountId::new(3)).is_not_found());
        assert!(TesseraError::not_found("Account", "3").is_not_found());
        assert!(!TesseraError::duplicate("email").is_not_found());
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = TesseraError::not_found("Account", "42");
        assert_eq!(err.to_string(), "Account not found: 42");
    }
}
