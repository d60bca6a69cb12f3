//! In-memory usage store.
//!
//! Thread-safe via internal `Mutex`. Suitable for single-server deployments
//! or testing. Does not persist counters across restarts.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::search::{ChatKitUsage, QuotaLimits, UsageKey};
use crate::ports::UsageStore;

#[derive(Default)]
pub struct InMemoryUsageStore {
    counters: Mutex<HashMap<UsageKey, ChatKitUsage>>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record, for tests that start from a known state.
    pub fn with_usage(self, usage: ChatKitUsage) -> Self {
        if let Ok(mut counters) = self.counters.lock() {
            counters.insert(usage.key.clone(), usage);
        }
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UsageKey, ChatKitUsage>>, DomainError> {
        self.counters
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "usage store lock poisoned"))
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn consume(
        &self,
        key: &UsageKey,
        today: NaiveDate,
        limits: QuotaLimits,
        now: Timestamp,
    ) -> Result<ChatKitUsage, DomainError> {
        let mut counters = self.lock()?;
        let current = counters
            .get(key)
            .cloned()
            .unwrap_or_else(|| ChatKitUsage::new(key.clone(), today));
        let next = current.consume(today, limits, now)?;
        counters.insert(key.clone(), next.clone());
        Ok(next)
    }

    async fn find_usage(&self, key: &UsageKey) -> Result<Option<ChatKitUsage>, DomainError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn delete_usage(&self, key: &UsageKey) -> Result<bool, DomainError> {
        Ok(self.lock()?.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn parallel_consumers_never_exceed_the_cap() {
        let store = Arc::new(InMemoryUsageStore::new());
        let key = UsageKey::anonymous(Some("10.0.0.9"));
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let limits = QuotaLimits {
            daily: 5,
            monthly: 100,
        };

        let mut tasks = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            let key = key.clone();
            tasks.push(tokio::spawn(async move {
                store.consume(&key, today, limits, Timestamp::now()).await.is_ok()
            }));
        }
        let mut accepted = 0;
        for task in tasks {
            if task.await.unwrap() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 5);
        assert_eq!(store.find_usage(&key).await.unwrap().unwrap().daily_sessions, 5);
    }

    #[tokio::test]
    async fn rejected_consume_leaves_counters_untouched() {
        let key = UsageKey::anonymous(Some("1.1.1.1"));
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let full = ChatKitUsage {
            daily_sessions: 20,
            monthly_sessions: 20,
            total_sessions: 20,
            ..ChatKitUsage::new(key.clone(), today)
        };
        let store = InMemoryUsageStore::new().with_usage(full.clone());

        let err = store
            .consume(&key, today, QuotaLimits::default(), Timestamp::now())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RateLimited);
        assert_eq!(store.find_usage(&key).await.unwrap(), Some(full));
    }
}
