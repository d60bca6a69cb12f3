//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// OpenAI settings for AI search (Assistants) and ChatKit sessions.
///
/// Each feature switches on only when its own id is set next to the key.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Assistant that answers AI search queries
    #[serde(default)]
    pub assistant_id: Option<String>,

    /// ChatKit workflow for the embedded widget
    #[serde(default)]
    pub workflow_id: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Overall deadline for one search run, in seconds
    #[serde(default = "default_search_timeout")]
    pub search_timeout_secs: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AiConfig {
    pub fn api_key(&self) -> Option<&str> {
        non_blank(&self.openai_api_key)
    }

    /// `(api_key, assistant_id)` when AI search is enabled.
    pub fn search(&self) -> Option<(&str, &str)> {
        Some((self.api_key()?, non_blank(&self.assistant_id)?))
    }

    /// `(api_key, workflow_id)` when ChatKit is enabled.
    pub fn chatkit(&self) -> Option<(&str, &str)> {
        Some((self.api_key()?, non_blank(&self.workflow_id)?))
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        if self.search_timeout_secs == 0
            || self.poll_interval_ms == 0
            || self.poll_interval_ms >= self.search_timeout_secs * 1000
        {
            return Err(ValidationError::InvalidPolling);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            assistant_id: None,
            workflow_id: None,
            base_url: default_base_url(),
            search_timeout_secs: default_search_timeout(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_search_timeout() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    1000
}
