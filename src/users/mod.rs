use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub mod model;
pub mod policy;
pub mod repo;
pub mod service;

pub fn router() -> Router<AppState> {
    handlers::admin_routes()
}
