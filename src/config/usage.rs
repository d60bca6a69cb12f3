//! AI usage quota and browser-facing settings

use serde::Deserialize;

use super::error::ValidationError;

/// Per-identity AI session quota.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageConfig {
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,

    #[serde(default = "default_monthly_limit")]
    pub monthly_limit: u32,

    /// Offset from UTC that defines the local date counters roll over on
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl UsageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.daily_limit == 0 || self.monthly_limit == 0 || self.daily_limit > self.monthly_limit
        {
            return Err(ValidationError::InvalidUsageLimits);
        }
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err(ValidationError::InvalidUtcOffset);
        }
        Ok(())
    }
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
            monthly_limit: default_monthly_limit(),
            utc_offset_minutes: 0,
        }
    }
}

fn default_daily_limit() -> u32 {
    20
}

fn default_monthly_limit() -> u32 {
    100
}

/// Values handed to the browser through `/api/clientConfig`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub maps_api_key: Option<String>,
}
