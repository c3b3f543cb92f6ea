use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::extractors::AdminUser,
    error::AdminError,
    extract::{ValidJson, ValidPath, ValidQuery},
    state::AppState,
    users::{
        dto::{CreateUserRequest, ListUsersQuery, UpdateUserRequest, UserPage},
        model::PublicUser,
        service::AdminService,
    },
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users).post(create_user))
        .route(
            "/admin/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

#[instrument(skip(svc, actor, payload), fields(actor_id = actor.id))]
pub async fn create_user(
    State(svc): State<AdminService>,
    AdminUser(actor): AdminUser,
    ValidJson(payload): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AdminError> {
    payload.validate()?;
    let user = svc.create_admin(payload, actor.role).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(svc, _actor))]
pub async fn list_users(
    State(svc): State<AdminService>,
    AdminUser(_actor): AdminUser,
    ValidQuery(q): ValidQuery<ListUsersQuery>,
) -> Result<Json<UserPage>, AdminError> {
    Ok(Json(svc.get_all_users(q.page, q.limit).await?))
}

#[instrument(skip(svc, _actor))]
pub async fn get_user(
    State(svc): State<AdminService>,
    AdminUser(_actor): AdminUser,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<PublicUser>, AdminError> {
    Ok(Json(svc.get_user_by_id(id).await?))
}

#[instrument(skip(svc, actor, payload), fields(actor_id = actor.id))]
pub async fn update_user(
    State(svc): State<AdminService>,
    AdminUser(actor): AdminUser,
    ValidPath(id): ValidPath<i64>,
    ValidJson(payload): ValidJson<UpdateUserRequest>,
) -> Result<Json<PublicUser>, AdminError> {
    payload.validate()?;
    Ok(Json(svc.update_user(id, actor.id, payload.into()).await?))
}

#[instrument(skip(svc, actor), fields(actor_id = actor.id))]
pub async fn delete_user(
    State(svc): State<AdminService>,
    AdminUser(actor): AdminUser,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, AdminError> {
    svc.delete_user(id, actor.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
