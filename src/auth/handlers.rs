use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RefreshRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::verify_password,
    },
    error::AdminError,
    extract::ValidJson,
    state::AppState,
    users::model::{Identity, User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_pair(keys: &JwtKeys, user: User) -> Result<Json<AuthResponse>, AdminError> {
    let access_token = keys.sign_access(user.id)?;
    let refresh_token = keys.sign_refresh(user.id)?;
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
    }))
}

fn invalid_credentials() -> AdminError {
    AdminError::unauthorized("Invalid credentials")
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AdminError> {
    let email = payload.email.trim();

    let Some(user) = state.users.find_by_email(email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(invalid_credentials());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(invalid_credentials());
    }

    if !user.is_active {
        warn!(user_id = user.id, "login for deactivated account");
        return Err(invalid_credentials());
    }

    info!(user_id = user.id, "user logged in");
    issue_pair(&JwtKeys::from_ref(&state), user)
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RefreshRequest>,
) -> Result<Json<AuthResponse>, AdminError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| AdminError::unauthorized(e.to_string()))?;

    match state.users.find_by_id(claims.sub).await? {
        Some(user) if user.is_active => issue_pair(&keys, user),
        _ => Err(AdminError::unauthorized("User not found")),
    }
}

#[instrument(skip_all)]
pub async fn get_me(AuthUser(identity): AuthUser) -> Json<Identity> {
    Json(identity)
}
