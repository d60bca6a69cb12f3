//! HTTP routes for reminder endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{create_reminder, delete_reminder, dispatch_reminders, list_reminders};

/// - `GET|POST|DELETE /api/reminders`
/// - `POST /api/reminders/dispatch` (shared-secret header)
pub fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/reminders",
            get(list_reminders)
                .post(create_reminder)
                .delete(delete_reminder),
        )
        .route("/api/reminders/dispatch", post(dispatch_reminders))
}
