//! OpenAI ChatKit session adapter.
//!
//! Creates a short-lived client secret bound to the configured workflow, so
//! the browser widget can talk to the agent directly.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::search::UsageKey;
use crate::ports::{AgentError, ChatKitProvider, ChatKitSession};

use super::openai_agent::{check_status, network_error, OpenAIConfig};

const CHATKIT_BETA: &str = "chatkit_beta=v1";

pub struct OpenAIChatKitProvider {
    config: OpenAIConfig,
    workflow_id: String,
    client: Client,
}

impl OpenAIChatKitProvider {
    pub fn new(config: OpenAIConfig, workflow_id: impl Into<String>) -> Result<Self, AgentError> {
        let client = config.client()?;
        Ok(Self {
            config,
            workflow_id: workflow_id.into(),
            client,
        })
    }
}

#[async_trait]
impl ChatKitProvider for OpenAIChatKitProvider {
    async fn create_session(&self, user: &UsageKey) -> Result<ChatKitSession, AgentError> {
        let body = CreateSession {
            workflow: Workflow {
                id: &self.workflow_id,
            },
            user: user.as_str(),
        };
        let response = self
            .client
            .post(self.config.url("chatkit/sessions"))
            .header("Authorization", self.config.bearer())
            .header("OpenAI-Beta", CHATKIT_BETA)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;
        let session: SessionResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;

        Ok(ChatKitSession {
            client_secret: session.client_secret,
            expires_at: session.expires_at,
        })
    }
}

#[derive(Serialize)]
struct CreateSession<'a> {
    workflow: Workflow<'a>,
    user: &'a str,
}

#[derive(Serialize)]
struct Workflow<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct SessionResponse {
    client_secret: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_names_workflow_and_user() {
        let body = CreateSession {
            workflow: Workflow { id: "wf_123" },
            user: "jane@example.com",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["workflow"]["id"], "wf_123");
        assert_eq!(json["user"], "jane@example.com");
    }

    #[test]
    fn response_tolerates_missing_expiry() {
        let parsed: SessionResponse =
            serde_json::from_str(r#"{"client_secret": "ek_abc", "id": "cksess_1"}"#).unwrap();
        assert_eq!(parsed.client_secret, "ek_abc");
        assert!(parsed.expires_at.is_none());
    }
}
