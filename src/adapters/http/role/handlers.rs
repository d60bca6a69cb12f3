//! HTTP handlers for role endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{ApiJson, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::{ResolveRoleQuery, SetRoleCommand};
use crate::domain::foundation::DomainError;
use crate::domain::role::{RoleResolution, UserRole};

use super::dto::{RoleResponse, SetRoleRequest};

/// `GET /api/userRoleSimple` - never fails once authenticated; store errors
/// come back as `error` on a customer resolution.
pub async fn get_role(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> impl IntoResponse {
    let resolution = state
        .resolve_role_handler()
        .handle(ResolveRoleQuery { user_id: user.id })
        .await;
    Json(RoleResponse::from(resolution))
}

/// `POST /api/userRoleSimple`
pub async fn set_role(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<SetRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role: UserRole = request.role.parse().map_err(DomainError::from)?;
    let stored = state
        .set_role_handler()
        .handle(SetRoleCommand {
            user_id: user.id,
            role,
        })
        .await?;
    tracing::info!(role = %stored, "role updated");
    Ok(Json(RoleResponse::from(RoleResolution::found(stored))))
}
