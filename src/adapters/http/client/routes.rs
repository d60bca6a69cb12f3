//! HTTP routes for client config and health.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{client_config, health};

pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/api/clientConfig", get(client_config))
        .route("/health", get(health))
}
