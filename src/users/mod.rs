use crate::state::AppState;
use axum::Router;

pub(crate) mod claims;
pub(crate) mod dto;
pub(crate) mod extractors;
pub(crate) mod handlers;
pub(crate) mod jwt;
mod password;
pub(crate) mod repo;
pub(crate) mod repo_types;
pub(crate) mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::public_routes())
        .merge(handlers::protected_routes())
}
