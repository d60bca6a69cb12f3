//! Create, list and delete the caller's reminders.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, OwnedByUser, ReminderId, Timestamp, UserId};
use crate::domain::reminder::{Reminder, ReminderInput};
use crate::ports::ReminderRepository;

#[derive(Debug, Clone)]
pub struct CreateReminderCommand {
    pub owner: UserId,
    pub input: ReminderInput,
}

pub struct ManageRemindersHandler {
    reminders: Arc<dyn ReminderRepository>,
}

impl ManageRemindersHandler {
    pub fn new(reminders: Arc<dyn ReminderRepository>) -> Self {
        Self { reminders }
    }

    pub async fn create(&self, cmd: CreateReminderCommand) -> Result<Reminder, DomainError> {
        let reminder = Reminder::schedule(cmd.owner, cmd.input, Timestamp::now())?;
        self.reminders.insert_reminder(&reminder).await?;
        tracing::info!(reminder_id = %reminder.id, user = %reminder.owner, "reminder scheduled");
        Ok(reminder)
    }

    pub async fn list(&self, owner: &UserId) -> Result<Vec<Reminder>, DomainError> {
        self.reminders.list_by_owner(owner).await
    }

    /// Deletes a reminder the caller owns; anything else is `NotFound`.
    pub async fn delete(&self, owner: &UserId, id: ReminderId) -> Result<(), DomainError> {
        let reminder = self
            .reminders
            .find_reminder(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reminder"))?;
        reminder.check_ownership(owner)?;
        self.reminders.delete_reminder(id).await?;
        tracing::info!(reminder_id = %id, user = %owner, "reminder deleted");
        Ok(())
    }
}
