//! UsageStore port - per-identity AI session counters.
//!
//! `consume` is the quota gate: it rolls the counters over, checks the caps
//! and increments in one atomic step so parallel requests from the same
//! identity cannot both take the last slot.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::search::{ChatKitUsage, QuotaLimits, UsageKey};

#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Counts one session, or fails with `RateLimited` when a cap is reached.
    async fn consume(
        &self,
        key: &UsageKey,
        today: NaiveDate,
        limits: QuotaLimits,
        now: Timestamp,
    ) -> Result<ChatKitUsage, DomainError>;

    async fn find_usage(&self, key: &UsageKey) -> Result<Option<ChatKitUsage>, DomainError>;

    async fn delete_usage(&self, key: &UsageKey) -> Result<bool, DomainError>;
}
