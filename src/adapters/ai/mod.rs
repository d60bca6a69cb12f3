//! AI Adapters.
//!
//! Implementations of the `SearchAgent` and `ChatKitProvider` ports.
//!
//! ## Available Adapters
//!
//! - `OpenAIAssistantAgent` - OpenAI Assistants runs for AI search
//! - `OpenAIChatKitProvider` - ChatKit client sessions for the embedded widget
//! - `MockSearchAgent` / `MockChatKitProvider` - Scripted mocks for testing

mod chatkit;
mod mock_agent;
mod openai_agent;

pub use chatkit::OpenAIChatKitProvider;
pub use mock_agent::{MockChatKitProvider, MockSearchAgent};
pub use openai_agent::{OpenAIAssistantAgent, OpenAIConfig};
