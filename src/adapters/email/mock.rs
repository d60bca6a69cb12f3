//! Recording email sender for tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::ports::{EmailError, EmailSender, OutgoingEmail};

#[derive(Debug, Default)]
pub struct MockEmailSender {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing_recipients: HashSet<String>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends to `address` fail with a 422.
    pub fn failing_for(mut self, address: impl Into<String>) -> Self {
        self.failing_recipients.insert(address.into());
        self
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        if self.failing_recipients.contains(&email.to) {
            return Err(EmailError::Rejected {
                status: 422,
                body: "recipient rejected".into(),
            });
        }
        self.sent
            .lock()
            .map_err(|_| EmailError::Request("mock lock poisoned".into()))?
            .push(email.clone());
        Ok(())
    }
}
