//! CreateChatKitSessionHandler - quota-gated ChatKit client session.

use std::sync::Arc;

use super::QuotaGate;
use crate::domain::foundation::DomainError;
use crate::domain::search::UsageKey;
use crate::ports::{ChatKitProvider, ChatKitSession};

pub struct CreateChatKitSessionHandler {
    provider: Arc<dyn ChatKitProvider>,
    gate: QuotaGate,
}

impl CreateChatKitSessionHandler {
    pub fn new(provider: Arc<dyn ChatKitProvider>, gate: QuotaGate) -> Self {
        Self { provider, gate }
    }

    pub async fn handle(&self, key: &UsageKey) -> Result<ChatKitSession, DomainError> {
        self.gate.consume(key).await?;

        let session = self.provider.create_session(key).await.map_err(|e| {
            tracing::error!(key = %key, error = %e, "failed to create ChatKit session");
            DomainError::from(e)
        })?;
        tracing::info!(key = %key, "ChatKit session created");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockChatKitProvider;
    use crate::adapters::memory::InMemoryUsageStore;
    use crate::application::handlers::search::UsagePolicy;
    use crate::domain::foundation::{ErrorCode, UserId};
    use crate::domain::search::QuotaLimits;
    use crate::ports::{AgentError, UsageStore};

    fn key() -> UsageKey {
        UsageKey::for_user(&UserId::new("a@example.com").unwrap())
    }

    #[tokio::test]
    async fn creates_session_and_counts_it() {
        let store = Arc::new(InMemoryUsageStore::new());
        let provider = Arc::new(MockChatKitProvider::new());
        let handler = CreateChatKitSessionHandler::new(
            provider.clone(),
            QuotaGate::new(store.clone(), UsagePolicy::default()),
        );

        let session = handler.handle(&key()).await.unwrap();
        assert!(session.client_secret.starts_with("ck_mock_"));
        assert_eq!(provider.sessions_created(), 1);
        let usage = store.find_usage(&key()).await.unwrap().unwrap();
        assert_eq!(usage.daily_sessions, 1);
    }

    #[tokio::test]
    async fn upstream_failure_keeps_consumed_quota() {
        let store = Arc::new(InMemoryUsageStore::new());
        let handler = CreateChatKitSessionHandler::new(
            Arc::new(MockChatKitProvider::failing(AgentError::Upstream {
                status: 500,
                body: "boom".into(),
            })),
            QuotaGate::new(
                store.clone(),
                UsagePolicy {
                    limits: QuotaLimits {
                        daily: 20,
                        monthly: 100,
                    },
                    utc_offset_minutes: 0,
                },
            ),
        );

        let err = handler.handle(&key()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AIProviderError);
        let usage = store.find_usage(&key()).await.unwrap().unwrap();
        assert_eq!(usage.daily_sessions, 1);
    }
}
