use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::{jwt::JwtKeys, middleware::{bearer_token, resolve_identity}};
use crate::{error::AdminError, state::AppState, users::model::Identity};

/// Identity set by [`super::middleware::optional_auth`], if any. Never rejects.
pub struct CurrentUser(pub Option<Identity>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(parts.extensions.get::<Identity>().cloned()))
    }
}

/// Requires a valid access token belonging to an active user.
pub struct AuthUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AdminError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved upstream by the optional-auth layer.
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(AuthUser(identity.clone()));
        }

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AdminError::unauthorized("Missing or invalid Authorization header"))?;

        let keys = JwtKeys::from(&state.config.jwt);
        match resolve_identity(&keys, state.users.as_ref(), token).await? {
            Some(identity) => Ok(AuthUser(identity)),
            None => {
                warn!("invalid or expired token");
                Err(AdminError::unauthorized("Invalid or expired token"))
            }
        }
    }
}

/// [`AuthUser`] whose role may use the `/admin` routes.
pub struct AdminUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AdminError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        if !identity.role.is_admin() {
            warn!(user_id = identity.id, role = %identity.role, "admin route denied");
            return Err(AdminError::forbidden("Admin role required"));
        }
        Ok(AdminUser(identity))
    }
}
