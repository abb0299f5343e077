/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tessera_core::TesseraError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Message returned for every failed credential check
pub const CHECK_CREDENTIALS: &str = "Check your credentials";

#[derive(Debug, Error)]
pub enum ServerError {
    /// Bad input shape or strength; the message is shown to the caller
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Authentication failed")]
    Unauthenticated,

    #[error("Access denied")]
    Unauthorized,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Signing key or storage unavailable; aborts the request
    #[error("Fatal error: {0}")]
    Fatal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(TesseraError),
}

impl ServerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn fatal(msg: impl Into<String>) -> Self {
        Self::Fatal(msg.into())
    }
}

impl From<TesseraError> for ServerError {
    fn from(err: TesseraError) -> Self {
        match err {
            TesseraError::AccountNotFound(id) => {
                ServerError::NotFound(format!("Account {id} not found"))
            }
            TesseraError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{entity} {id} not found"))
            }
            TesseraError::Duplicate(msg) => ServerError::Conflict(msg),
            other => ServerError::Database(other),
        }
    }
}

impl From<tessera_storage::StorageError> for ServerError {
    fn from(err: tessera_storage::StorageError) -> Self {
        ServerError::Database(err.into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, CHECK_CREDENTIALS.to_string())
            }
            ServerError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, "Access denied".to_string()),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::Fatal(ref msg) => {
                tracing::error!("Fatal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
