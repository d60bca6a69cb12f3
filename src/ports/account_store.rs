//! Usernames and rebooking reminders.

use async_trait::async_trait;

use crate::domain::account::UsernameClaim;
use crate::domain::foundation::{DomainError, ReminderId, Timestamp, UserId};
use crate::domain::reminder::Reminder;

#[async_trait]
pub trait UsernameRepository: Send + Sync {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<UsernameClaim>, DomainError>;

    /// Claims or renames the owner's handle. `Conflict` when another account holds it.
    async fn claim(&self, claim: &UsernameClaim) -> Result<(), DomainError>;

    async fn release(&self, owner: &UserId) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait ReminderRepository: Send + Sync {
    async fn insert_reminder(&self, reminder: &Reminder) -> Result<(), DomainError>;

    async fn find_reminder(&self, id: ReminderId) -> Result<Option<Reminder>, DomainError>;

    /// Owner's reminders, soonest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Reminder>, DomainError>;

    /// Unsent reminders whose time has come, oldest first.
    async fn list_due(&self, now: Timestamp, limit: u32) -> Result<Vec<Reminder>, DomainError>;

    async fn mark_sent(&self, id: ReminderId) -> Result<(), DomainError>;

    async fn delete_reminder(&self, id: ReminderId) -> Result<bool, DomainError>;

    async fn delete_by_owner(&self, owner: &UserId) -> Result<u32, DomainError>;
}
