//! HTTP handlers for account endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{ApiJson, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::{ClaimUsernameCommand, DeleteAccountCommand};

use super::dto::{ClaimUsernameRequest, DeleteAccountRequest, UsernameResponse};

/// `DELETE /api/deleteAccount` - removes the caller's app data.
pub async fn delete_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<DeleteAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .delete_account_handler()
        .handle(DeleteAccountCommand {
            user_id: user.id,
            confirmation: request.confirmation,
        })
        .await?;
    Ok(Json(report))
}

/// `POST /api/username`
pub async fn claim_username(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<ClaimUsernameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state
        .claim_username_handler()
        .handle(ClaimUsernameCommand {
            owner: user.id,
            username: request.username,
        })
        .await?;
    Ok(Json(UsernameResponse::from(Some(claim))))
}

/// `GET /api/username`
pub async fn get_username(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let claim = state.get_username_handler().handle(&user.id).await?;
    Ok(Json(UsernameResponse::from(claim)))
}
