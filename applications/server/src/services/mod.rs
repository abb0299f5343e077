/// Server services
pub mod directory;
pub mod password;
pub mod policy;
pub mod token;

pub use directory::{AccountDirectory, CreateAccount, FindQuery};
pub use password::PasswordCodec;
pub use policy::{Action, Caller, Role, Scope};
pub use token::{Claims, TokenService};
