use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    auth::extractors::CurrentUser,
    error::AdminError,
    settings::model::SiteSetting,
    state::AppState,
};

pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/settings", get(list_settings))
}

/// Public settings for everyone; administrators also see private ones.
#[instrument(skip_all, fields(user_id = current.as_ref().map(|i| i.id)))]
pub async fn list_settings(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
) -> Result<Json<Vec<SiteSetting>>, AdminError> {
    let include_private = current.as_ref().is_some_and(|i| i.role.is_admin());
    let settings = state.settings.list(include_private).await?;
    Ok(Json(settings))
}
