//! Per-identity AI session quota with local-date rollover.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};

/// Identity a quota is charged to: the account email, or `anon:{ip}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UsageKey(String);

impl UsageKey {
    pub fn for_user(user: &UserId) -> Self {
        Self(user.as_str().to_string())
    }

    pub fn anonymous(client_ip: Option<&str>) -> Self {
        let ip = client_ip
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .unwrap_or("unknown");
        Self(format!("anon:{}", ip))
    }

    pub fn resolve(user: Option<&UserId>, client_ip: Option<&str>) -> Self {
        match user {
            Some(user) => Self::for_user(user),
            None => Self::anonymous(client_ip),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.starts_with("anon:")
    }
}

impl fmt::Display for UsageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session caps per local day and calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaLimits {
    pub daily: u32,
    pub monthly: u32,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            daily: 20,
            monthly: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuotaExceeded {
    #[error("Daily limit reached: you can start {limit} AI sessions per day. Try again tomorrow.")]
    Daily { limit: u32 },

    #[error("Monthly limit reached: you can start {limit} AI sessions per month.")]
    Monthly { limit: u32 },
}

impl From<QuotaExceeded> for DomainError {
    fn from(err: QuotaExceeded) -> Self {
        let scope = match err {
            QuotaExceeded::Daily { .. } => "daily",
            QuotaExceeded::Monthly { .. } => "monthly",
        };
        DomainError::new(ErrorCode::RateLimited, err.to_string()).with_detail("limit", scope)
    }
}

/// Session counters for one identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatKitUsage {
    pub key: UsageKey,
    pub daily_sessions: u32,
    pub monthly_sessions: u32,
    pub total_sessions: u64,
    pub last_reset_date: NaiveDate,
    pub updated_at: Timestamp,
}

impl ChatKitUsage {
    pub fn new(key: UsageKey, today: NaiveDate) -> Self {
        Self {
            key,
            daily_sessions: 0,
            monthly_sessions: 0,
            total_sessions: 0,
            last_reset_date: today,
            updated_at: Timestamp::now(),
        }
    }

    /// Counters as of `today`: daily resets on a later date, monthly on a later month.
    /// A date at or before the last reset leaves the counters untouched.
    pub fn rolled_over(&self, today: NaiveDate) -> Self {
        if today <= self.last_reset_date {
            return self.clone();
        }
        let same_month = today.year() == self.last_reset_date.year()
            && today.month() == self.last_reset_date.month();
        Self {
            daily_sessions: 0,
            monthly_sessions: if same_month { self.monthly_sessions } else { 0 },
            last_reset_date: today,
            ..self.clone()
        }
    }

    /// Fails when either cap is already reached.
    pub fn check(&self, limits: QuotaLimits) -> Result<(), QuotaExceeded> {
        if self.daily_sessions >= limits.daily {
            return Err(QuotaExceeded::Daily {
                limit: limits.daily,
            });
        }
        if self.monthly_sessions >= limits.monthly {
            return Err(QuotaExceeded::Monthly {
                limit: limits.monthly,
            });
        }
        Ok(())
    }

    /// Rolls over, checks, and counts one more session.
    pub fn consume(
        &self,
        today: NaiveDate,
        limits: QuotaLimits,
        now: Timestamp,
    ) -> Result<Self, QuotaExceeded> {
        let current = self.rolled_over(today);
        current.check(limits)?;
        Ok(Self {
            daily_sessions: current.daily_sessions + 1,
            monthly_sessions: current.monthly_sessions + 1,
            total_sessions: current.total_sessions + 1,
            updated_at: now,
            ..current
        })
    }

    pub fn snapshot(&self, limits: QuotaLimits) -> UsageSnapshot {
        UsageSnapshot {
            daily_sessions: self.daily_sessions,
            monthly_sessions: self.monthly_sessions,
            total_sessions: self.total_sessions,
            daily_limit: limits.daily,
            monthly_limit: limits.monthly,
            daily_remaining: limits.daily.saturating_sub(self.daily_sessions),
            monthly_remaining: limits.monthly.saturating_sub(self.monthly_sessions),
            last_reset_date: self.last_reset_date,
        }
    }
}

/// Counters plus remaining quota, as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub daily_sessions: u32,
    pub monthly_sessions: u32,
    pub total_sessions: u64,
    pub daily_limit: u32,
    pub monthly_limit: u32,
    pub daily_remaining: u32,
    pub monthly_remaining: u32,
    pub last_reset_date: NaiveDate,
}
