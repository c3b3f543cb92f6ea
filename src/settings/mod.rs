use crate::state::AppState;
use axum::Router;

pub mod defaults;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub mod model;
pub mod repo;
pub mod seed;

pub fn router() -> Router<AppState> {
    handlers::settings_routes()
}
