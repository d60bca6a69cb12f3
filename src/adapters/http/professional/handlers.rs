//! HTTP handlers for professional endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{ApiJson, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    CreateProfileCommand, SavePortfolioItemCommand, SaveServiceCommand, UpdateProfileCommand,
};
use crate::domain::foundation::{PortfolioItemId, ProfileId, ServiceId};
use crate::domain::professional::{DirectoryFilter, ProfileInput};

use super::dto::{DirectoryQuery, IdQuery, PortfolioRequest, ServiceRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Own profile
// ════════════════════════════════════════════════════════════════════════════════

pub async fn get_own_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.get_own_profile_handler().handle(&user.id).await?;
    Ok(Json(profile))
}

pub async fn create_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(input): ApiJson<ProfileInput>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .create_profile_handler()
        .handle(CreateProfileCommand {
            owner: user.id,
            input,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(input): ApiJson<ProfileInput>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            owner: user.id,
            input,
        })
        .await?;
    Ok(Json(profile))
}

// ════════════════════════════════════════════════════════════════════════════════
// Directory
// ════════════════════════════════════════════════════════════════════════════════

pub async fn list_professionals(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = DirectoryFilter::from(query);
    let profiles = state.list_professionals_handler().handle(&filter).await?;
    Ok(Json(profiles))
}

pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ProfileId = ApiError::parse_id("id", &id)?;
    let page = state.public_profile_handler().handle(id).await?;
    Ok(Json(page))
}

// ════════════════════════════════════════════════════════════════════════════════
// Services
// ════════════════════════════════════════════════════════════════════════════════

pub async fn list_services(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let services = state.services_handler().list(&user.id).await?;
    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<ServiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state
        .services_handler()
        .save(SaveServiceCommand {
            owner: user.id,
            service_id: None,
            input: request.fields,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update_service(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<ServiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = request
        .id
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("id", "id is required"))?;
    let service_id: ServiceId = ApiError::parse_id("id", raw)?;
    let service = state
        .services_handler()
        .save(SaveServiceCommand {
            owner: user.id,
            service_id: Some(service_id),
            input: request.fields,
        })
        .await?;
    Ok(Json(service))
}

pub async fn delete_service(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let service_id: ServiceId = ApiError::parse_id("id", &query.id)?;
    state.services_handler().delete(&user.id, service_id).await?;
    Ok(Json(json!({ "deleted": true, "id": service_id.to_string() })))
}

// ════════════════════════════════════════════════════════════════════════════════
// Portfolio
// ════════════════════════════════════════════════════════════════════════════════

pub async fn list_portfolio(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.portfolio_handler().list(&user.id).await?;
    Ok(Json(items))
}

pub async fn create_portfolio_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<PortfolioRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .portfolio_handler()
        .save(SavePortfolioItemCommand {
            owner: user.id,
            item_id: None,
            input: request.fields,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_portfolio_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<PortfolioRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = request
        .id
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("id", "id is required"))?;
    let item_id: PortfolioItemId = ApiError::parse_id("id", raw)?;
    let item = state
        .portfolio_handler()
        .save(SavePortfolioItemCommand {
            owner: user.id,
            item_id: Some(item_id),
            input: request.fields,
        })
        .await?;
    Ok(Json(item))
}

pub async fn delete_portfolio_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id: PortfolioItemId = ApiError::parse_id("id", &query.id)?;
    state.portfolio_handler().delete(&user.id, item_id).await?;
    Ok(Json(json!({ "deleted": true, "id": item_id.to_string() })))
}
