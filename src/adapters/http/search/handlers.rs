//! HTTP handlers for AI search, ChatKit sessions and usage.
//!
//! Quota is keyed by the account email when a valid token is present and by
//! `anon:{client ip}` otherwise.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{ApiJson, ClientIp, OptionalAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::AiSearchCommand;
use crate::domain::foundation::DomainError;
use crate::domain::search::UsageKey;
use crate::ports::AgentError;

use super::dto::{AiSearchRequest, ChatKitStatusResponse};

fn usage_key(auth: &OptionalAuth, ip: &ClientIp) -> UsageKey {
    UsageKey::resolve(auth.0.as_ref().map(|u| &u.id), ip.as_deref())
}

fn not_configured() -> ApiError {
    ApiError(DomainError::from(AgentError::NotConfigured))
}

/// `POST /api/aiSearch`
pub async fn ai_search(
    State(state): State<AppState>,
    auth: OptionalAuth,
    ip: ClientIp,
    ApiJson(request): ApiJson<AiSearchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.ai_search_handler().ok_or_else(not_configured)?;
    let key = usage_key(&auth, &ip);
    tracing::info!(key = %key, "ai search");
    let result = handler
        .handle(AiSearchCommand {
            query: request.query,
            key,
        })
        .await?;
    Ok(Json(result))
}

/// `POST /api/chatkit/session`
pub async fn create_chatkit_session(
    State(state): State<AppState>,
    auth: OptionalAuth,
    ip: ClientIp,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.chatkit_session_handler().ok_or_else(not_configured)?;
    let session = handler.handle(&usage_key(&auth, &ip)).await?;
    Ok(Json(session))
}

/// `GET /api/chatkit/session`
pub async fn chatkit_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(ChatKitStatusResponse {
        configured: state.chatkit.is_some(),
    })
}

/// `GET /api/chatkit/usage`
pub async fn get_usage(
    State(state): State<AppState>,
    auth: OptionalAuth,
    ip: ClientIp,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.usage_handler().get(&usage_key(&auth, &ip)).await?;
    Ok(Json(snapshot))
}

/// `POST /api/chatkit/usage`
pub async fn record_usage(
    State(state): State<AppState>,
    auth: OptionalAuth,
    ip: ClientIp,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.usage_handler().record(&usage_key(&auth, &ip)).await?;
    Ok(Json(snapshot))
}
