//! Hosted LLM agent and ChatKit session ports.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::search::{SearchQuery, UsageKey};

#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("AI provider is not configured")]
    NotConfigured,

    #[error("AI provider request failed: {0}")]
    Network(String),

    #[error("AI provider returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Could not parse AI provider response: {0}")]
    Parse(String),

    #[error("AI run failed: {0}")]
    RunFailed(String),

    #[error("AI search timed out after {0} seconds")]
    Timeout(u64),
}

impl From<AgentError> for DomainError {
    fn from(err: AgentError) -> Self {
        DomainError::new(ErrorCode::AIProviderError, err.to_string())
    }
}

/// Handle of a started agent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandle {
    pub thread_id: String,
    pub run_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Queued or in progress.
    Pending,
    /// Finished; carries the assistant's reply text if it produced any.
    Completed(Option<String>),
    /// Failed, cancelled or expired.
    Failed(String),
}

/// A hosted agent that answers one search query per run.
#[async_trait]
pub trait SearchAgent: Send + Sync {
    async fn start_run(&self, query: &SearchQuery) -> Result<RunHandle, AgentError>;

    async fn poll_run(&self, run: &RunHandle) -> Result<RunStatus, AgentError>;
}

/// Client credentials for an embedded ChatKit conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatKitSession {
    pub client_secret: String,
    pub expires_at: Option<i64>,
}

#[async_trait]
pub trait ChatKitProvider: Send + Sync {
    async fn create_session(&self, user: &UsageKey) -> Result<ChatKitSession, AgentError>;
}
