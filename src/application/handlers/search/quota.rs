//! Quota gate shared by the AI search and ChatKit handlers.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::search::{ChatKitUsage, QuotaLimits, UsageKey, UsageSnapshot};
use crate::ports::UsageStore;

/// Caps plus the offset that defines the "local date" for rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsagePolicy {
    pub limits: QuotaLimits,
    pub utc_offset_minutes: i32,
}

impl UsagePolicy {
    pub fn today(&self, now: Timestamp) -> NaiveDate {
        now.local_date(self.utc_offset_minutes)
    }
}

/// Consumes one unit of quota per AI session.
///
/// Consumed quota is not refunded when the upstream call fails.
#[derive(Clone)]
pub struct QuotaGate {
    store: Arc<dyn UsageStore>,
    policy: UsagePolicy,
}

impl QuotaGate {
    pub fn new(store: Arc<dyn UsageStore>, policy: UsagePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> UsagePolicy {
        self.policy
    }

    pub async fn consume(&self, key: &UsageKey) -> Result<ChatKitUsage, DomainError> {
        let now = Timestamp::now();
        let today = self.policy.today(now);
        match self.store.consume(key, today, self.policy.limits, now).await {
            Ok(usage) => Ok(usage),
            Err(e) => {
                tracing::info!(key = %key, error = %e, "AI session refused");
                Err(e)
            }
        }
    }
}

/// Reads and records ChatKit usage for the widget.
pub struct UsageHandler {
    store: Arc<dyn UsageStore>,
    gate: QuotaGate,
}

impl UsageHandler {
    pub fn new(store: Arc<dyn UsageStore>, policy: UsagePolicy) -> Self {
        Self {
            gate: QuotaGate::new(store.clone(), policy),
            store,
        }
    }

    /// Counters as of today, after any rollover.
    pub async fn get(&self, key: &UsageKey) -> Result<UsageSnapshot, DomainError> {
        let policy = self.gate.policy();
        let today = policy.today(Timestamp::now());
        let usage = match self.store.find_usage(key).await? {
            Some(usage) => usage.rolled_over(today),
            None => ChatKitUsage::new(key.clone(), today),
        };
        Ok(usage.snapshot(policy.limits))
    }

    /// Counts one session opened by the widget itself.
    pub async fn record(&self, key: &UsageKey) -> Result<UsageSnapshot, DomainError> {
        let usage = self.gate.consume(key).await?;
        Ok(usage.snapshot(self.gate.policy().limits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUsageStore;
    use crate::domain::foundation::{ErrorCode, UserId};

    fn policy(daily: u32, monthly: u32) -> UsagePolicy {
        UsagePolicy {
            limits: QuotaLimits { daily, monthly },
            utc_offset_minutes: 0,
        }
    }

    fn key() -> UsageKey {
        UsageKey::for_user(&UserId::new("a@example.com").unwrap())
    }

    #[tokio::test]
    async fn fresh_identity_has_full_quota() {
        let handler = UsageHandler::new(Arc::new(InMemoryUsageStore::new()), policy(20, 100));
        let snapshot = handler.get(&key()).await.unwrap();
        assert_eq!(snapshot.daily_sessions, 0);
        assert_eq!(snapshot.daily_remaining, 20);
    }

    #[tokio::test]
    async fn record_counts_until_daily_cap() {
        let handler = UsageHandler::new(Arc::new(InMemoryUsageStore::new()), policy(2, 100));
        handler.record(&key()).await.unwrap();
        let snapshot = handler.record(&key()).await.unwrap();
        assert_eq!(snapshot.daily_remaining, 0);

        let err = handler.record(&key()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RateLimited);
        assert_eq!(err.details.get("limit").map(String::as_str), Some("daily"));
        assert_eq!(handler.get(&key()).await.unwrap().daily_sessions, 2);
    }

    #[tokio::test]
    async fn monthly_cap_applies() {
        let handler = UsageHandler::new(Arc::new(InMemoryUsageStore::new()), policy(10, 1));
        handler.record(&key()).await.unwrap();
        let err = handler.record(&key()).await.unwrap_err();
        assert_eq!(err.details.get("limit").map(String::as_str), Some("monthly"));
    }
}
