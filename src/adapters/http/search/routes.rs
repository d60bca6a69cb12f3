//! HTTP routes for AI search and ChatKit endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{ai_search, chatkit_status, create_chatkit_session, get_usage, record_usage};

/// Search routes. All accept anonymous callers.
///
/// - `POST /api/aiSearch`
/// - `GET|POST /api/chatkit/session`
/// - `GET|POST /api/chatkit/usage`
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/api/aiSearch", post(ai_search))
        .route(
            "/api/chatkit/session",
            get(chatkit_status).post(create_chatkit_session),
        )
        .route("/api/chatkit/usage", get(get_usage).post(record_usage))
}
