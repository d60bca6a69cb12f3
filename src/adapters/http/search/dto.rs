//! HTTP DTOs for AI search and ChatKit endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AiSearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatKitStatusResponse {
    pub configured: bool,
}
