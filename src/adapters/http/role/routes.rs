//! HTTP routes for role endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{get_role, set_role};

/// `GET|POST /api/userRoleSimple`
pub fn role_routes() -> Router<AppState> {
    Router::new().route("/api/userRoleSimple", get(get_role).post(set_role))
}
