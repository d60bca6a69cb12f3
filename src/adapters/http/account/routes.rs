//! HTTP routes for account endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{claim_username, delete_account, get_username};

/// - `DELETE /api/deleteAccount`
/// - `GET|POST /api/username`
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/api/deleteAccount", delete(delete_account))
        .route("/api/username", get(get_username).post(claim_username))
}
