//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Reminder email via Resend. Without this section reminders are stored but
/// never dispatched.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub resend_api_key: String,

    #[serde(default = "default_from_email")]
    pub from_email: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Shared secret a scheduler sends in `x-dispatch-secret`
    #[serde(default)]
    pub dispatch_secret: Option<String>,
}

impl EmailConfig {
    /// Formatted `From` header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resend_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__RESEND_API_KEY"));
        }
        if !self.resend_api_key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if self
            .dispatch_secret
            .as_deref()
            .is_some_and(|s| s.trim().is_empty())
        {
            return Err(ValidationError::MissingRequired("EMAIL__DISPATCH_SECRET"));
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            dispatch_secret: None,
        }
    }
}

fn default_from_email() -> String {
    "reminders@styleboard.app".to_string()
}

fn default_from_name() -> String {
    "Styleboard".to_string()
}
