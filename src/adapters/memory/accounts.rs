//! In-memory usernames and reminders.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::account::{username_taken, UsernameClaim};
use crate::domain::foundation::{DomainError, ErrorCode, ReminderId, Timestamp, UserId};
use crate::domain::reminder::Reminder;
use crate::ports::{ReminderRepository, UsernameRepository};

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    m.lock()
        .map_err(|_| DomainError::new(ErrorCode::InternalError, "account store lock poisoned"))
}

#[derive(Default)]
pub struct InMemoryUsernameRepository {
    claims: Mutex<HashMap<UserId, UsernameClaim>>,
}

impl InMemoryUsernameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsernameRepository for InMemoryUsernameRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<UsernameClaim>, DomainError> {
        Ok(lock(&self.claims)?.get(owner).cloned())
    }

    async fn claim(&self, claim: &UsernameClaim) -> Result<(), DomainError> {
        let mut claims = lock(&self.claims)?;
        let taken = claims
            .values()
            .any(|c| c.username == claim.username && c.owner != claim.owner);
        if taken {
            return Err(username_taken(&claim.username));
        }
        claims.insert(claim.owner.clone(), claim.clone());
        Ok(())
    }

    async fn release(&self, owner: &UserId) -> Result<bool, DomainError> {
        Ok(lock(&self.claims)?.remove(owner).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryReminderRepository {
    reminders: Mutex<HashMap<ReminderId, Reminder>>,
}

impl InMemoryReminderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReminderRepository for InMemoryReminderRepository {
    async fn insert_reminder(&self, reminder: &Reminder) -> Result<(), DomainError> {
        lock(&self.reminders)?.insert(reminder.id, reminder.clone());
        Ok(())
    }

    async fn find_reminder(&self, id: ReminderId) -> Result<Option<Reminder>, DomainError> {
        Ok(lock(&self.reminders)?.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Reminder>, DomainError> {
        let mut list: Vec<Reminder> = lock(&self.reminders)?
            .values()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.remind_at.cmp(&b.remind_at));
        Ok(list)
    }

    async fn list_due(&self, now: Timestamp, limit: u32) -> Result<Vec<Reminder>, DomainError> {
        let mut due: Vec<Reminder> = lock(&self.reminders)?
            .values()
            .filter(|r| r.is_due(now))
            .cloned()
            .collect();
        due.sort_by(|a, b| a.remind_at.cmp(&b.remind_at));
        due.truncate(limit as usize);
        Ok(due)
    }

    async fn mark_sent(&self, id: ReminderId) -> Result<(), DomainError> {
        match lock(&self.reminders)?.get_mut(&id) {
            Some(r) => {
                r.sent = true;
                Ok(())
            }
            None => Err(DomainError::not_found("Reminder")),
        }
    }

    async fn delete_reminder(&self, id: ReminderId) -> Result<bool, DomainError> {
        Ok(lock(&self.reminders)?.remove(&id).is_some())
    }

    async fn delete_by_owner(&self, owner: &UserId) -> Result<u32, DomainError> {
        let mut reminders = lock(&self.reminders)?;
        let before = reminders.len();
        reminders.retain(|_, r| &r.owner != owner);
        Ok((before - reminders.len()) as u32)
    }
}
