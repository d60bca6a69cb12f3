//! OpenAI Assistants adapter for the `SearchAgent` port.
//!
//! A search is one run on a fresh thread: `POST /v1/threads/runs` creates the
//! thread with the user's query and starts the configured assistant. Polling
//! reads the run; once it completes, the newest thread message holds the
//! answer text.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::search::SearchQuery;
use crate::ports::{AgentError, RunHandle, RunStatus, SearchAgent};

const ASSISTANTS_BETA: &str = "assistants=v2";

/// Connection settings shared by the OpenAI adapters.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn client(&self) -> Result<Client, AgentError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AgentError::Network(format!("Failed to create HTTP client: {}", e)))
    }
}

/// Maps transport failures.
pub(crate) fn network_error(e: reqwest::Error) -> AgentError {
    if e.is_connect() {
        AgentError::Network(format!("Connection failed: {}", e))
    } else {
        AgentError::Network(e.to_string())
    }
}

/// Passes successful responses through, turns the rest into `Upstream`.
pub(crate) async fn check_status(response: Response) -> Result<Response, AgentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AgentError::Upstream {
        status: status.as_u16(),
        body,
    })
}

pub struct OpenAIAssistantAgent {
    config: OpenAIConfig,
    assistant_id: String,
    client: Client,
}

impl OpenAIAssistantAgent {
    pub fn new(config: OpenAIConfig, assistant_id: impl Into<String>) -> Result<Self, AgentError> {
        let client = config.client()?;
        Ok(Self {
            config,
            assistant_id: assistant_id.into(),
            client,
        })
    }

    async fn latest_message_text(&self, thread_id: &str) -> Result<Option<String>, AgentError> {
        let response = self
            .client
            .get(self.config.url(&format!("threads/{}/messages", thread_id)))
            .query(&[("order", "desc"), ("limit", "1")])
            .header("Authorization", self.config.bearer())
            .header("OpenAI-Beta", ASSISTANTS_BETA)
            .send()
            .await
            .map_err(network_error)?;
        let list: MessageList = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;
        Ok(list.first_assistant_text())
    }
}

#[async_trait]
impl SearchAgent for OpenAIAssistantAgent {
    async fn start_run(&self, query: &SearchQuery) -> Result<RunHandle, AgentError> {
        let body = CreateThreadAndRun {
            assistant_id: &self.assistant_id,
            thread: NewThread {
                messages: vec![NewMessage {
                    role: "user",
                    content: query.as_str(),
                }],
            },
        };
        let response = self
            .client
            .post(self.config.url("threads/runs"))
            .header("Authorization", self.config.bearer())
            .header("OpenAI-Beta", ASSISTANTS_BETA)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;
        let run: RunObject = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;

        tracing::debug!(run_id = %run.id, thread_id = %run.thread_id, "started search run");
        Ok(RunHandle {
            thread_id: run.thread_id,
            run_id: run.id,
        })
    }

    async fn poll_run(&self, run: &RunHandle) -> Result<RunStatus, AgentError> {
        let response = self
            .client
            .get(self.config.url(&format!("threads/{}/runs/{}", run.thread_id, run.run_id)))
            .header("Authorization", self.config.bearer())
            .header("OpenAI-Beta", ASSISTANTS_BETA)
            .send()
            .await
            .map_err(network_error)?;
        let object: RunObject = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;

        match object.status.as_str() {
            "queued" | "in_progress" | "cancelling" => Ok(RunStatus::Pending),
            "completed" => Ok(RunStatus::Completed(
                self.latest_message_text(&run.thread_id).await?,
            )),
            other => Ok(RunStatus::Failed(
                object
                    .last_error
                    .map(|e| e.message)
                    .unwrap_or_else(|| format!("run ended with status '{}'", other)),
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct CreateThreadAndRun<'a> {
    assistant_id: &'a str,
    thread: NewThread<'a>,
}

#[derive(Serialize)]
struct NewThread<'a> {
    messages: Vec<NewMessage<'a>>,
}

#[derive(Serialize)]
struct NewMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct RunObject {
    id: String,
    thread_id: String,
    status: String,
    #[serde(default)]
    last_error: Option<RunError>,
}

#[derive(Deserialize)]
struct RunError {
    message: String,
}

#[derive(Deserialize)]
struct MessageList {
    data: Vec<ThreadMessage>,
}

#[derive(Deserialize)]
struct ThreadMessage {
    role: String,
    #[serde(default)]
    content: Vec<MessageContent>,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<TextContent>,
}

#[derive(Deserialize)]
struct TextContent {
    value: String,
}

impl MessageList {
    fn first_assistant_text(self) -> Option<String> {
        let message = self.data.into_iter().find(|m| m.role == "assistant")?;
        let text: Vec<String> = message
            .content
            .into_iter()
            .filter(|c| c.kind == "text")
            .filter_map(|c| c.text.map(|t| t.value))
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text.join("\n"))
        }
    }
}
