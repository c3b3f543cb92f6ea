use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{info, instrument, warn};

use crate::{
    auth::password::hash_password,
    error::AdminError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, UserPage},
        model::{NewUser, PublicUser, Role, User, UserChanges},
        policy::{authorize, Action, Actor, Target},
        repo::UserStore,
    },
};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Floors `page` at 1 and clamps `limit` into `1..=MAX_LIMIT`.
pub fn normalize_page(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    (page, limit)
}

/// `ceil(total / limit)`; zero rows means zero pages.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Privileged user-lifecycle operations. Every result is a [`PublicUser`].
#[derive(Clone)]
pub struct AdminService {
    users: Arc<dyn UserStore>,
}

impl FromRef<AppState> for AdminService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone())
    }
}

impl AdminService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    async fn load(&self, id: i64) -> Result<User, AdminError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AdminError::not_found("user not found"))
    }

    /// Creates an already-active, already-verified account.
    #[instrument(skip(self, data), fields(email = %data.email))]
    pub async fn create_admin(
        &self,
        data: CreateUserRequest,
        requesting_role: Role,
    ) -> Result<PublicUser, AdminError> {
        if let Err(e) = authorize(Action::CreateUser, &Actor::with_role(requesting_role), None) {
            warn!(role = %requesting_role, "create user denied");
            return Err(e);
        }

        if self.users.find_by_email(&data.email).await?.is_some() {
            warn!("email already exists");
            return Err(AdminError::validation("email already exists"));
        }

        let password_hash = hash_password(&data.password)?;
        let user = self
            .users
            .insert(NewUser {
                email: data.email,
                username: data.username,
                password_hash,
                role: data.role.unwrap_or_default().into(),
                is_active: true,
                is_email_verified: true,
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "user created");
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn get_all_users(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<UserPage, AdminError> {
        let (page, limit) = normalize_page(page, limit);
        let offset = (page - 1).saturating_mul(limit);

        let rows = self.users.list(limit, offset).await?;
        let total = self.users.count().await?;

        Ok(UserPage {
            users: rows.into_iter().map(PublicUser::from).collect(),
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: i64) -> Result<PublicUser, AdminError> {
        Ok(self.load(id).await?.into())
    }

    #[instrument(skip(self, changes))]
    pub async fn update_user(
        &self,
        user_id: i64,
        current_user_id: i64,
        changes: UserChanges,
    ) -> Result<PublicUser, AdminError> {
        let user = self.load(user_id).await?;

        let target = Target { id: user.id, role: user.role };
        let actor = Actor::with_id(current_user_id);
        if let Err(e) = authorize(Action::UpdateUser, &actor, Some(&target)) {
            warn!(target_role = %user.role, "update denied");
            return Err(e);
        }

        if let Some(email) = changes.email.as_deref() {
            if email != user.email {
                if let Some(owner) = self.users.find_by_email(email).await? {
                    if owner.id != user.id {
                        warn!("email already exists");
                        return Err(AdminError::validation("email already exists"));
                    }
                }
            }
        }

        let updated = self
            .users
            .update(user_id, changes)
            .await?
            .ok_or_else(|| AdminError::not_found("user not found"))?;

        info!(user_id, "user updated");
        Ok(updated.into())
    }

    /// Soft delete: the row stays, `is_active` becomes false.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: i64, current_user_id: i64) -> Result<(), AdminError> {
        let user = self.load(user_id).await?;

        let target = Target { id: user.id, role: user.role };
        let actor = Actor::with_id(current_user_id);
        if let Err(e) = authorize(Action::DeleteUser, &actor, Some(&target)) {
            warn!(target_role = %user.role, "delete denied");
            return Err(e);
        }

        self.users.deactivate(user_id).await?;
        info!(user_id, "user deactivated");
        Ok(())
    }
}
