//! Mock search agent and ChatKit provider for testing.
//!
//! The agent replays a scripted sequence of run statuses, one per poll.
//! Once the script runs out it keeps answering `Pending`, which is how
//! tests exercise the search timeout.
//!
//! ```ignore
//! let agent = MockSearchAgent::new()
//!     .with_status(RunStatus::Pending)
//!     .with_status(RunStatus::Completed(Some("Try Jane at ShopX".into())));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::domain::search::{SearchQuery, UsageKey};
use crate::ports::{
    AgentError, ChatKitProvider, ChatKitSession, RunHandle, RunStatus, SearchAgent,
};

#[derive(Debug, Default)]
pub struct MockSearchAgent {
    script: Mutex<VecDeque<RunStatus>>,
    start_error: Option<AgentError>,
    started: AtomicU32,
    polls: AtomicU32,
    queries: Mutex<Vec<String>>,
}

impl MockSearchAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agent whose first poll completes with `text`.
    pub fn answering(text: impl Into<String>) -> Self {
        Self::new().with_status(RunStatus::Completed(Some(text.into())))
    }

    pub fn with_status(self, status: RunStatus) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(status);
        }
        self
    }

    /// Makes `start_run` fail.
    pub fn with_start_error(mut self, error: AgentError) -> Self {
        self.start_error = Some(error);
        self
    }

    pub fn runs_started(&self) -> u32 {
        self.started.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchAgent for MockSearchAgent {
    async fn start_run(&self, query: &SearchQuery) -> Result<RunHandle, AgentError> {
        if let Some(err) = &self.start_error {
            return Err(err.clone());
        }
        let n = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.as_str().to_string());
        }
        Ok(RunHandle {
            thread_id: format!("thread_mock_{}", n),
            run_id: format!("run_mock_{}", n),
        })
    }

    async fn poll_run(&self, _run: &RunHandle) -> Result<RunStatus, AgentError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .map_err(|_| AgentError::Network("mock script lock poisoned".into()))?
            .pop_front();
        Ok(next.unwrap_or(RunStatus::Pending))
    }
}

/// ChatKit provider returning deterministic secrets.
#[derive(Debug, Default)]
pub struct MockChatKitProvider {
    fail_with: Option<AgentError>,
    created: AtomicU32,
}

impl MockChatKitProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: AgentError) -> Self {
        Self {
            fail_with: Some(error),
            created: AtomicU32::new(0),
        }
    }

    pub fn sessions_created(&self) -> u32 {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatKitProvider for MockChatKitProvider {
    async fn create_session(&self, user: &UsageKey) -> Result<ChatKitSession, AgentError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ChatKitSession {
            client_secret: format!("ck_mock_{}_{}", user, n),
            expires_at: None,
        })
    }
}
