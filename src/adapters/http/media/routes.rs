//! HTTP routes for media endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::upload_image;

/// `POST /api/uploadImage`
pub fn media_routes() -> Router<AppState> {
    Router::new().route("/api/uploadImage", post(upload_image))
}
