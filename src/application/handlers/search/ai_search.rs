//! AiSearchHandler - one quota-gated agent run per query.
//!
//! The run is polled every `poll_interval` until it finishes or
//! `timeout` elapses. A timeout is a hard failure.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::QuotaGate;
use crate::domain::foundation::DomainError;
use crate::domain::search::{answer_text, SearchQuery, UsageKey};
use crate::ports::{AgentError, RunHandle, RunStatus, SearchAgent};

#[derive(Debug, Clone)]
pub struct AiSearchCommand {
    pub query: String,
    pub key: UsageKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiSearchResult {
    pub answer: String,
}

/// Polling cadence and overall deadline for a run.
#[derive(Debug, Clone, Copy)]
pub struct SearchTiming {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for SearchTiming {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct AiSearchHandler {
    agent: Arc<dyn SearchAgent>,
    gate: QuotaGate,
    timing: SearchTiming,
}

impl AiSearchHandler {
    pub fn new(agent: Arc<dyn SearchAgent>, gate: QuotaGate, timing: SearchTiming) -> Self {
        Self {
            agent,
            gate,
            timing,
        }
    }

    pub async fn handle(&self, cmd: AiSearchCommand) -> Result<AiSearchResult, DomainError> {
        let query = SearchQuery::new(&cmd.query)?;
        self.gate.consume(&cmd.key).await?;

        let run = self.agent.start_run(&query).await.map_err(|e| {
            tracing::error!(key = %cmd.key, error = %e, "failed to start AI search run");
            DomainError::from(e)
        })?;

        let output = tokio::time::timeout(self.timing.timeout, self.wait_for(&run))
            .await
            .map_err(|_| AgentError::Timeout(self.timing.timeout.as_secs()))
            .and_then(|r| r)
            .map_err(|e| {
                tracing::error!(key = %cmd.key, run_id = %run.run_id, error = %e, "AI search failed");
                DomainError::from(e)
            })?;

        tracing::info!(key = %cmd.key, run_id = %run.run_id, "AI search completed");
        Ok(AiSearchResult {
            answer: answer_text(output),
        })
    }

    async fn wait_for(&self, run: &RunHandle) -> Result<Option<String>, AgentError> {
        loop {
            match self.agent.poll_run(run).await? {
                RunStatus::Completed(output) => return Ok(output),
                RunStatus::Failed(reason) => return Err(AgentError::RunFailed(reason)),
                RunStatus::Pending => tokio::time::sleep(self.timing.poll_interval).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockSearchAgent;
    use crate::adapters::memory::InMemoryUsageStore;
    use crate::application::handlers::search::UsagePolicy;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::search::{QuotaLimits, NO_RESULTS};

    fn fast() -> SearchTiming {
        SearchTiming {
            poll_interval: Duration::from_millis(5),
            timeout: Duration::from_millis(200),
        }
    }

    fn gate(daily: u32) -> QuotaGate {
        QuotaGate::new(
            Arc::new(InMemoryUsageStore::new()),
            UsagePolicy {
                limits: QuotaLimits {
                    daily,
                    monthly: 100,
                },
                utc_offset_minutes: 0,
            },
        )
    }

    fn cmd(query: &str) -> AiSearchCommand {
        AiSearchCommand {
            query: query.into(),
            key: UsageKey::anonymous(Some("10.0.0.1")),
        }
    }

    #[tokio::test]
    async fn returns_answer_after_pending_polls() {
        let agent = Arc::new(
            MockSearchAgent::new()
                .with_status(RunStatus::Pending)
                .with_status(RunStatus::Pending)
                .with_status(RunStatus::Completed(Some(" Try Jane at ShopX ".into()))),
        );
        let handler = AiSearchHandler::new(agent.clone(), gate(20), fast());

        let result = handler.handle(cmd("braids in Austin")).await.unwrap();
        assert_eq!(result.answer, "Try Jane at ShopX");
        assert_eq!(agent.polls(), 3);
        assert_eq!(agent.queries(), vec!["braids in Austin".to_string()]);
    }

    #[tokio::test]
    async fn empty_output_becomes_no_results() {
        let agent = Arc::new(MockSearchAgent::new().with_status(RunStatus::Completed(None)));
        let handler = AiSearchHandler::new(agent, gate(20), fast());
        assert_eq!(handler.handle(cmd("q")).await.unwrap().answer, NO_RESULTS);
    }

    #[tokio::test]
    async fn blank_query_is_rejected_without_consuming_quota() {
        let agent = Arc::new(MockSearchAgent::answering("x"));
        let handler = AiSearchHandler::new(agent.clone(), gate(1), fast());

        let err = handler.handle(cmd("   ")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(agent.runs_started(), 0);

        assert!(handler.handle(cmd("ok")).await.is_ok());
    }

    #[tokio::test]
    async fn failed_run_is_provider_error() {
        let agent = Arc::new(MockSearchAgent::new().with_status(RunStatus::Failed("expired".into())));
        let handler = AiSearchHandler::new(agent, gate(20), fast());
        let err = handler.handle(cmd("q")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AIProviderError);
    }

    #[tokio::test]
    async fn run_that_never_finishes_times_out() {
        let agent = Arc::new(MockSearchAgent::new());
        let handler = AiSearchHandler::new(
            agent.clone(),
            gate(20),
            SearchTiming {
                poll_interval: Duration::from_millis(5),
                timeout: Duration::from_millis(40),
            },
        );
        let err = handler.handle(cmd("q")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AIProviderError);
        assert!(err.message.contains("timed out"));
        assert!(agent.polls() >= 2);
    }

    #[tokio::test]
    async fn quota_is_checked_before_the_agent() {
        let agent = Arc::new(
            MockSearchAgent::answering("a").with_status(RunStatus::Completed(Some("b".into()))),
        );
        let handler = AiSearchHandler::new(agent.clone(), gate(1), fast());
        handler.handle(cmd("first")).await.unwrap();

        let err = handler.handle(cmd("second")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RateLimited);
        assert_eq!(agent.runs_started(), 1);
    }
}
