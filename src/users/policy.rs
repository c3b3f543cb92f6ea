//! Authorization rules for user-lifecycle operations.
//!
//! Every mutating admin operation is checked here so the role rules live in
//! one table instead of being repeated per method.

use crate::error::AdminError;
use crate::users::model::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateUser,
    UpdateUser,
    DeleteUser,
}

/// Who is acting. Callers fill in whichever half the operation is given.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: Option<i64>,
    pub role: Option<Role>,
}

/// The account being acted on.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub id: i64,
    pub role: Role,
}

impl Actor {
    pub fn with_role(role: Role) -> Self {
        Self { id: None, role: Some(role) }
    }

    pub fn with_id(id: i64) -> Self {
        Self { id: Some(id), role: None }
    }

    fn is(&self, target: &Target) -> bool {
        self.id == Some(target.id)
    }
}

pub fn authorize(action: Action, actor: &Actor, target: Option<&Target>) -> Result<(), AdminError> {
    match (action, target) {
        (Action::CreateUser, _) => {
            if actor.role != Some(Role::Superadmin) {
                return Err(AdminError::forbidden("only superadmin may create users"));
            }
        }
        (Action::UpdateUser, Some(target)) => {
            if target.role == Role::Superadmin && !actor.is(target) {
                return Err(AdminError::forbidden("cannot modify superadmin account"));
            }
        }
        (Action::DeleteUser, Some(target)) => {
            // Superadmin is checked first: a superadmin deleting themself gets this message.
            if target.role == Role::Superadmin {
                return Err(AdminError::forbidden("cannot delete superadmin account"));
            }
            if actor.is(target) {
                return Err(AdminError::forbidden("cannot delete your own account"));
            }
        }
        (Action::UpdateUser | Action::DeleteUser, None) => {
            return Err(AdminError::Internal(anyhow::anyhow!(
                "{action:?} requires a target account"
            )));
        }
    }
    Ok(())
}
