//! HTTP handlers for reminder endpoints.

use axum::extract::{Json, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use subtle::ConstantTimeEq;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{ApiJson, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::CreateReminderCommand;
use crate::domain::foundation::{DomainError, ErrorCode, ReminderId};
use crate::domain::reminder::ReminderInput;

use super::dto::ReminderIdQuery;

/// Header carrying the dispatch secret.
pub const DISPATCH_SECRET_HEADER: &str = "x-dispatch-secret";

pub async fn create_reminder(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(input): ApiJson<ReminderInput>,
) -> Result<impl IntoResponse, ApiError> {
    let reminder = state
        .reminders_handler()
        .create(CreateReminderCommand {
            owner: user.id,
            input,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

pub async fn list_reminders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let reminders = state.reminders_handler().list(&user.id).await?;
    Ok(Json(reminders))
}

pub async fn delete_reminder(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ReminderIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ReminderId = ApiError::parse_id("id", &query.id)?;
    state.reminders_handler().delete(&user.id, id).await?;
    Ok(Json(json!({ "deleted": true, "id": id.to_string() })))
}

/// `POST /api/reminders/dispatch` - called by a scheduler, not a user.
pub async fn dispatch_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(expected), Some(handler)) = (
        state.settings.dispatch_secret.as_deref(),
        state.dispatch_reminders_handler(),
    ) else {
        return Err(ApiError(DomainError::new(
            ErrorCode::EmailError,
            "Reminder email is not configured",
        )));
    };

    let provided = headers
        .get(DISPATCH_SECRET_HEADER)
        .map(|v| v.as_bytes())
        .unwrap_or_default();
    if !secret_matches(provided, expected) {
        return Err(ApiError::forbidden("Invalid dispatch secret"));
    }

    let report = handler.handle().await?;
    Ok(Json(report))
}

/// Constant-time comparison of the presented secret.
fn secret_matches(provided: &[u8], expected: &str) -> bool {
    !expected.is_empty() && provided.ct_eq(expected.as_bytes()).unwrap_u8() == 1
}
