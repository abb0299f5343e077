//! Tessera Server Library
//!
//! User-account backend: password handling, session tokens, role-based
//! access decisions and the HTTP API in front of them.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod seed;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AccountDirectory, Caller, PasswordCodec, Role, TokenService};
pub use state::AppState;
