//! Reminder module - rebooking reminders delivered by email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::foundation::{
    max_chars, optional_text, required_text, OwnedByUser, ReminderId, Timestamp, UserId,
    ValidationError,
};

const MAX_NOTE_CHARS: usize = 500;

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderInput {
    pub professional_name: String,
    #[serde(default)]
    pub note: Option<String>,
    pub remind_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub owner: UserId,
    pub professional_name: String,
    pub note: Option<String>,
    pub remind_at: Timestamp,
    pub sent: bool,
    pub created_at: Timestamp,
}

impl Reminder {
    /// Schedules a reminder; `remind_at` must lie in the future.
    pub fn schedule(owner: UserId, input: ReminderInput, now: Timestamp) -> Result<Self, ValidationError> {
        let professional_name = required_text("professional_name", &input.professional_name)?;
        let note = optional_text(input.note);
        if let Some(note) = &note {
            max_chars("note", note, MAX_NOTE_CHARS)?;
        }
        let remind_at = Timestamp::from_datetime(input.remind_at);
        if !remind_at.is_after(&now) {
            return Err(ValidationError::invalid_format(
                "remind_at",
                "must be in the future",
            ));
        }
        Ok(Self {
            id: ReminderId::new(),
            owner,
            professional_name,
            note,
            remind_at,
            sent: false,
            created_at: now,
        })
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        !self.sent && !self.remind_at.is_after(&now)
    }

    pub fn subject(&self) -> String {
        format!("Time to rebook with {}", self.professional_name)
    }

    pub fn body(&self) -> String {
        match &self.note {
            Some(note) => format!(
                "Hi! This is your reminder to book your next visit with {}.\n\nYour note: {}",
                self.professional_name, note
            ),
            None => format!(
                "Hi! This is your reminder to book your next visit with {}.",
                self.professional_name
            ),
        }
    }
}

impl OwnedByUser for Reminder {
    fn owner_id(&self) -> &UserId {
        &self.owner
    }

    fn resource_name(&self) -> &'static str {
        "Reminder"
    }
}

/// Summary of one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub due: u32,
    pub sent: u32,
    pub failed: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::new("a@example.com").unwrap()
    }

    fn input(offset_secs: i64, now: Timestamp) -> ReminderInput {
        ReminderInput {
            professional_name: "Jane".into(),
            note: Some("Ask about highlights".into()),
            remind_at: *now.plus_secs(offset_secs).as_datetime(),
        }
    }

    #[test]
    fn schedules_future_reminder() {
        let now = Timestamp::now();
        let reminder = Reminder::schedule(owner(), input(3600, now), now).unwrap();
        assert!(!reminder.sent);
        assert!(!reminder.is_due(now));
        assert!(reminder.is_due(now.plus_secs(3600)));
    }

    #[test]
    fn rejects_past_reminder() {
        let now = Timestamp::now();
        let err = Reminder::schedule(owner(), input(-60, now), now).unwrap_err();
        assert_eq!(err.field(), "remind_at");
    }

    #[test]
    fn sent_reminders_are_never_due() {
        let now = Timestamp::now();
        let mut reminder = Reminder::schedule(owner(), input(1, now), now).unwrap();
        reminder.sent = true;
        assert!(!reminder.is_due(now.plus_secs(10)));
    }

    #[test]
    fn body_includes_note() {
        let now = Timestamp::now();
        let reminder = Reminder::schedule(owner(), input(60, now), now).unwrap();
        assert!(reminder.body().contains("Ask about highlights"));
        assert_eq!(reminder.subject(), "Time to rebook with Jane");
    }
}
