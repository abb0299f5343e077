//! Role-based access decisions for account operations
//!
//! Every directory operation asks [`authorize`] first. Administrators get
//! [`Scope::Any`]; standard callers either get narrowed to their own record or
//! are turned away with [`ServerError::Unauthorized`].

use crate::error::{Result, ServerError};
use serde::Serialize;
use tessera_core::{Account, AccountId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Standard,
}

impl Role {
    pub fn of(account: &Account) -> Self {
        if account.is_admin {
            Role::Admin
        } else {
            Role::Standard
        }
    }
}

/// Resolved identity behind a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
}

impl Caller {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone().unwrap_or_default(),
            role: Role::of(account),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Operation requested against the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Read(AccountId),
    Create,
    Update(AccountId),
    Delete(AccountId),
}

/// How far a permitted operation may reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Any,
    OwnRecord(AccountId),
}

pub fn authorize(caller: &Caller, action: Action) -> Result<Scope> {
    match (caller.role, action) {
        (Role::Admin, _) => Ok(Scope::Any),
        (Role::Standard, Action::List) => Ok(Scope::OwnRecord(caller.id)),
        (Role::Standard, Action::Read(target) | Action::Update(target)) if target == caller.id => {
            Ok(Scope::OwnRecord(caller.id))
        }
        (Role::Standard, _) => {
            tracing::debug!(
                caller_id = %caller.id,
                ?action,
                "Standard caller denied"
            );
            Err(ServerError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(id: i64, role: Role) -> Caller {
        Caller {
            id: AccountId::new(id),
            email: format!("user{id}@x.com"),
            role,
        }
    }

    #[test]
    fn admin_may_do_anything() {
        let admin = caller(1, Role::Admin);
        let other = AccountId::new(99);

        for action in [
            Action::List,
            Action::Read(other),
            Action::Create,
            Action::Update(other),
            Action::Delete(other),
            Action::Delete(admin.id),
        ] {
            assert_eq!(authorize(&admin, action).unwrap(), Scope::Any);
        }
    }

    #[test]
    fn standard_list_is_narrowed_to_self() {
        let user = caller(7, Role::Standard);
        assert_eq!(
            authorize(&user, Action::List).unwrap(),
            Scope::OwnRecord(AccountId::new(7))
        );
    }

    #[test]
    fn standard_may_read_and_update_self_only() {
        let user = caller(7, Role::Standard);
        let me = AccountId::new(7);
        let other = AccountId::new(8);

        assert_eq!(authorize(&user, Action::Read(me)).unwrap(), Scope::OwnRecord(me));
        assert_eq!(authorize(&user, Action::Update(me)).unwrap(), Scope::OwnRecord(me));
        assert!(matches!(
            authorize(&user, Action::Read(other)),
            Err(ServerError::Unauthorized)
        ));
        assert!(matches!(
            authorize(&user, Action::Update(other)),
            Err(ServerError::Unauthorized)
        ));
    }

    #[test]
    fn standard_may_not_create_or_delete() {
        let user = caller(7, Role::Standard);

        assert!(matches!(
            authorize(&user, Action::Create),
            Err(ServerError::Unauthorized)
        ));
        assert!(matches!(
            authorize(&user, Action::Delete(user.id)),
            Err(ServerError::Unauthorized)
        ));
    }
}
