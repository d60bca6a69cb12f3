//! Ownership trait for user-owned records.
//!
//! Reviews, profiles and reminders each belong to one account. A caller who
//! does not own a record gets the same answer as if it did not exist, so
//! `check_ownership` reports `NotFound` rather than `Forbidden`.

use super::{DomainError, ErrorCode, UserId};

/// Trait for records that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this record.
    fn owner_id(&self) -> &UserId;

    /// Human readable name of the record type, used in error messages.
    fn resource_name(&self) -> &'static str;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning `NotFound` if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::NotFound,
                format!("{} not found", self.resource_name()),
            )
            .with_detail("requested_by", user_id.to_string()))
        }
    }
}
