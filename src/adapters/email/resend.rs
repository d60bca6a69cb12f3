//! Resend transactional email adapter.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{EmailError, EmailSender, OutgoingEmail};

#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    pub from_email: String,
    pub from_name: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>, from_email: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            from_email: from_email.into(),
            from_name: None,
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// `Name <address>` when a sender name is configured.
    fn sender(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_email),
            None => self.from_email.clone(),
        }
    }
}

pub struct ResendEmailSender {
    config: ResendConfig,
    client: Client,
}

impl ResendEmailSender {
    pub fn new(config: ResendConfig) -> Result<Self, EmailError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmailError::Request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let body = SendRequest {
            from: self.config.sender(),
            to: [email.to.as_str()],
            subject: &email.subject,
            text: &email.text,
        };
        let response = self
            .client
            .post(format!("{}/emails", self.config.base_url))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Resend rejected email");
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_includes_display_name() {
        let config = ResendConfig::new("re_123", "hello@styleboard.app");
        assert_eq!(config.sender(), "hello@styleboard.app");
        let named = config.with_from_name("Styleboard");
        assert_eq!(named.sender(), "Styleboard <hello@styleboard.app>");
    }

    #[test]
    fn request_body_shape() {
        let body = SendRequest {
            from: "a@b.com".into(),
            to: ["c@d.com"],
            subject: "Hi",
            text: "Body",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["to"][0], "c@d.com");
        assert_eq!(json["subject"], "Hi");
    }
}
