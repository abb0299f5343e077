//! Tessera Core
//!
//! Domain types, the persistence contract and error handling shared by the
//! Tessera account backend.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Account`, `Credential`, `AccountFilter`, `Pagination`
//! - **Core Traits**: `AccountStore`, the persistence collaborator
//! - **Error Handling**: Unified `TesseraError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tessera_core::types::{AccountFilter, Pagination};
//!
//! let filter = AccountFilter::default().with_name("ali");
//! let page = Pagination::default();
//!
//! assert_eq!(page.limit, 15);
//! assert_eq!(filter.name.as_deref(), Some("ali"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, TesseraError};
pub use store::AccountStore;

pub use types::{
    Account, AccountFilter, AccountId, Credential, NewAccount, Pagination, DELETED_ACCOUNT_NAME,
};
