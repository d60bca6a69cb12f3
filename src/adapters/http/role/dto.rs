//! HTTP DTOs for role endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::role::{RoleHome, RoleResolution, UserRole};

#[derive(Debug, Clone, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

/// Resolved role plus where the client should land.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub role: UserRole,
    pub has_record: bool,
    pub home: RoleHome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RoleResolution> for RoleResponse {
    fn from(resolution: RoleResolution) -> Self {
        Self {
            home: resolution.home(),
            role: resolution.role,
            has_record: resolution.has_record,
            error: resolution.error,
        }
    }
}
