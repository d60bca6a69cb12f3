//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the Styleboard domain.

mod auth;
mod errors;
mod ids;
mod ownership;
mod star_rating;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PortfolioItemId, ProfileId, ReminderId, ReviewId, ServiceId, UserId};
pub use ownership::OwnedByUser;
pub use star_rating::StarRating;
pub use timestamp::Timestamp;

/// Trims a text field and rejects it when blank.
pub fn required_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field, mapping blank input to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Rejects text longer than `max` characters.
pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::out_of_range(field, 0, max as i64, len as i64));
    }
    Ok(())
}
