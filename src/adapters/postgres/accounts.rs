//! PostgreSQL usernames and reminders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{username_taken, Username, UsernameClaim};
use crate::domain::foundation::{DomainError, ReminderId, Timestamp, UserId};
use crate::domain::reminder::Reminder;
use crate::ports::{ReminderRepository, UsernameRepository};

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsernameRepository for PostgresAccountRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<UsernameClaim>, DomainError> {
        let row: Option<(String, DateTime<Utc>)> =
            sqlx::query_as("SELECT username, claimed_at FROM usernames WHERE owner_email = $1")
                .bind(owner.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch username", e))?;

        row.map(|(username, claimed_at)| {
            Ok(UsernameClaim {
                owner: owner.clone(),
                username: Username::new(&username)
                    .map_err(|e| DomainError::database("Invalid stored username", e))?,
                claimed_at: Timestamp::from_datetime(claimed_at),
            })
        })
        .transpose()
    }

    async fn claim(&self, claim: &UsernameClaim) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO usernames (owner_email, username, claimed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner_email) DO UPDATE SET
                username = EXCLUDED.username,
                claimed_at = EXCLUDED.claimed_at
            "#,
        )
        .bind(claim.owner.as_str())
        .bind(claim.username.as_str())
        .bind(claim.claimed_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("usernames_username_key") {
                    return username_taken(&claim.username);
                }
            }
            DomainError::database("Failed to claim username", e)
        })?;
        Ok(())
    }

    async fn release(&self, owner: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM usernames WHERE owner_email = $1")
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to release username", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReminderRow {
    id: Uuid,
    owner_email: String,
    professional_name: String,
    note: Option<String>,
    remind_at: DateTime<Utc>,
    sent: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReminderRow> for Reminder {
    type Error = DomainError;

    fn try_from(row: ReminderRow) -> Result<Self, Self::Error> {
        Ok(Reminder {
            id: ReminderId::from_uuid(row.id),
            owner: UserId::new(row.owner_email)
                .map_err(|e| DomainError::database("Invalid reminder owner", e))?,
            professional_name: row.professional_name,
            note: row.note,
            remind_at: Timestamp::from_datetime(row.remind_at),
            sent: row.sent,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const REMINDER_COLUMNS: &str =
    "id, owner_email, professional_name, note, remind_at, sent, created_at";

#[async_trait]
impl ReminderRepository for PostgresAccountRepository {
    async fn insert_reminder(&self, reminder: &Reminder) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reminders (
                id, owner_email, professional_name, note, remind_at, sent, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reminder.id.as_uuid())
        .bind(reminder.owner.as_str())
        .bind(&reminder.professional_name)
        .bind(&reminder.note)
        .bind(reminder.remind_at.as_datetime())
        .bind(reminder.sent)
        .bind(reminder.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save reminder", e))?;
        Ok(())
    }

    async fn find_reminder(&self, id: ReminderId) -> Result<Option<Reminder>, DomainError> {
        let row: Option<ReminderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reminders WHERE id = $1",
            REMINDER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch reminder", e))?;

        row.map(Reminder::try_from).transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Reminder>, DomainError> {
        let rows: Vec<ReminderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reminders WHERE owner_email = $1 ORDER BY remind_at",
            REMINDER_COLUMNS
        ))
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list reminders", e))?;

        rows.into_iter().map(Reminder::try_from).collect()
    }

    async fn list_due(&self, now: Timestamp, limit: u32) -> Result<Vec<Reminder>, DomainError> {
        let rows: Vec<ReminderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reminders WHERE NOT sent AND remind_at <= $1 \
             ORDER BY remind_at LIMIT $2",
            REMINDER_COLUMNS
        ))
        .bind(now.as_datetime())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list due reminders", e))?;

        rows.into_iter().map(Reminder::try_from).collect()
    }

    async fn mark_sent(&self, id: ReminderId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE reminders SET sent = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to mark reminder sent", e))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Reminder"));
        }
        Ok(())
    }

    async fn delete_reminder(&self, id: ReminderId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM reminders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete reminder", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_owner(&self, owner: &UserId) -> Result<u32, DomainError> {
        let result = sqlx::query("DELETE FROM reminders WHERE owner_email = $1")
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete reminders", e))?;
        Ok(result.rows_affected() as u32)
    }
}
