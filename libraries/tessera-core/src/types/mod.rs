mod account;
mod filter;
mod ids;

pub use account::{Account, Credential, NewAccount, DELETED_ACCOUNT_NAME};
pub use filter::{AccountFilter, Pagination, DEFAULT_PAGE_LIMIT};
pub use ids::AccountId;
