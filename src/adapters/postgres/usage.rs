//! PostgreSQL `chatkit_usage` counters.
//!
//! `consume` seeds the row if needed, locks it with `SELECT ... FOR UPDATE`
//! and writes back the rolled-over, incremented counters in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::search::{ChatKitUsage, QuotaLimits, UsageKey};
use crate::ports::UsageStore;

pub struct PostgresUsageStore {
    pool: PgPool,
}

impl PostgresUsageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UsageRow {
    daily_sessions: i32,
    monthly_sessions: i32,
    total_sessions: i64,
    last_reset_date: NaiveDate,
    updated_at: DateTime<Utc>,
}

impl UsageRow {
    fn into_usage(self, key: &UsageKey) -> ChatKitUsage {
        ChatKitUsage {
            key: key.clone(),
            daily_sessions: self.daily_sessions.max(0) as u32,
            monthly_sessions: self.monthly_sessions.max(0) as u32,
            total_sessions: self.total_sessions.max(0) as u64,
            last_reset_date: self.last_reset_date,
            updated_at: Timestamp::from_datetime(self.updated_at),
        }
    }
}

const USAGE_COLUMNS: &str =
    "daily_sessions, monthly_sessions, total_sessions, last_reset_date, updated_at";

#[async_trait]
impl UsageStore for PostgresUsageStore {
    async fn consume(
        &self,
        key: &UsageKey,
        today: NaiveDate,
        limits: QuotaLimits,
        now: Timestamp,
    ) -> Result<ChatKitUsage, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO chatkit_usage (usage_key, last_reset_date, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (usage_key) DO NOTHING
            "#,
        )
        .bind(key.as_str())
        .bind(today)
        .bind(now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to seed usage", e))?;

        let row: UsageRow = sqlx::query_as(&format!(
            "SELECT {} FROM chatkit_usage WHERE usage_key = $1 FOR UPDATE",
            USAGE_COLUMNS
        ))
        .bind(key.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to read usage", e))?;

        // Over quota: the transaction is dropped and rolled back untouched.
        let next = row.into_usage(key).consume(today, limits, now)?;

        sqlx::query(
            r#"
            UPDATE chatkit_usage SET
                daily_sessions = $2,
                monthly_sessions = $3,
                total_sessions = $4,
                last_reset_date = $5,
                updated_at = $6
            WHERE usage_key = $1
            "#,
        )
        .bind(key.as_str())
        .bind(next.daily_sessions as i32)
        .bind(next.monthly_sessions as i32)
        .bind(next.total_sessions as i64)
        .bind(next.last_reset_date)
        .bind(next.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update usage", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit usage", e))?;

        Ok(next)
    }

    async fn find_usage(&self, key: &UsageKey) -> Result<Option<ChatKitUsage>, DomainError> {
        let row: Option<UsageRow> = sqlx::query_as(&format!(
            "SELECT {} FROM chatkit_usage WHERE usage_key = $1",
            USAGE_COLUMNS
        ))
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch usage", e))?;

        Ok(row.map(|r| r.into_usage(key)))
    }

    async fn delete_usage(&self, key: &UsageKey) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM chatkit_usage WHERE usage_key = $1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete usage", e))?;
        Ok(result.rows_affected() > 0)
    }
}
