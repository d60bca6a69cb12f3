//! Client bootstrap config and health check.

use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde::Serialize;

use crate::adapters::http::state::AppState;

/// What the browser needs to know before rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ClientConfigResponse {
    pub maps_api_key: Option<String>,
    pub ai_search_enabled: bool,
    pub chatkit_enabled: bool,
}

pub async fn client_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(ClientConfigResponse {
        maps_api_key: state.settings.maps_api_key.clone(),
        ai_search_enabled: state.search_agent.is_some(),
        chatkit_enabled: state.chatkit.is_some(),
    })
}

pub async fn health() -> &'static str {
    "ok"
}
