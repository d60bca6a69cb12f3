//! DispatchDueRemindersHandler - emails reminders whose time has come.
//!
//! Each due reminder is sent once and marked sent. Send failures are
//! counted and left unsent for the next pass; nothing is retried here.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::reminder::DispatchReport;
use crate::ports::{EmailSender, OutgoingEmail, ReminderRepository};

/// Reminders handled per dispatch call.
pub const DISPATCH_BATCH: u32 = 100;

pub struct DispatchDueRemindersHandler {
    reminders: Arc<dyn ReminderRepository>,
    email: Arc<dyn EmailSender>,
}

impl DispatchDueRemindersHandler {
    pub fn new(reminders: Arc<dyn ReminderRepository>, email: Arc<dyn EmailSender>) -> Self {
        Self { reminders, email }
    }

    pub async fn handle(&self) -> Result<DispatchReport, DomainError> {
        let due = self.reminders.list_due(Timestamp::now(), DISPATCH_BATCH).await?;
        let mut report = DispatchReport {
            due: due.len() as u32,
            ..Default::default()
        };

        for reminder in due {
            let email = OutgoingEmail {
                to: reminder.owner.to_string(),
                subject: reminder.subject(),
                text: reminder.body(),
            };
            match self.email.send(&email).await {
                Ok(()) => {
                    self.reminders.mark_sent(reminder.id).await?;
                    report.sent += 1;
                }
                Err(e) => {
                    tracing::warn!(reminder_id = %reminder.id, error = %e, "reminder email failed");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(due = report.due, sent = report.sent, failed = report.failed, "reminder dispatch finished");
        Ok(report)
    }
}
