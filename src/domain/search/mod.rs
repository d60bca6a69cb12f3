//! Search module - AI-assisted professional search and its usage quota.

mod usage;

pub use usage::{ChatKitUsage, QuotaExceeded, QuotaLimits, UsageKey, UsageSnapshot};

use crate::domain::foundation::{max_chars, required_text, ValidationError};

/// Reply used when a completed run produced no text.
pub const NO_RESULTS: &str = "No results found.";

const MAX_QUERY_CHARS: usize = 1000;

/// A non-blank natural language search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let query = required_text("query", raw)?;
        max_chars("query", &query, MAX_QUERY_CHARS)?;
        Ok(Self(query))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Text returned to the client for a finished run.
pub fn answer_text(output: Option<String>) -> String {
    output
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_RESULTS.to_string())
}
