//! HTTP DTOs for reminder endpoints.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderIdQuery {
    pub id: String,
}
