//! AI search, ChatKit session and usage handlers.

mod ai_search;
mod chatkit_session;
mod quota;

pub use ai_search::{AiSearchCommand, AiSearchHandler, AiSearchResult, SearchTiming};
pub use chatkit_session::CreateChatKitSessionHandler;
pub use quota::{QuotaGate, UsageHandler, UsagePolicy};
