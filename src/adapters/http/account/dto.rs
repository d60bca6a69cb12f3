//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::UsernameClaim;

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAccountRequest {
    #[serde(default)]
    pub confirmation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimUsernameRequest {
    pub username: String,
}

/// `username` is null when the caller has not claimed one.
#[derive(Debug, Clone, Serialize)]
pub struct UsernameResponse {
    pub username: Option<String>,
}

impl From<Option<UsernameClaim>> for UsernameResponse {
    fn from(claim: Option<UsernameClaim>) -> Self {
        Self {
            username: claim.map(|c| c.username.as_str().to_string()),
        }
    }
}
