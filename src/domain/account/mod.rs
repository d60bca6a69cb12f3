//! Account module - usernames and self-service account deletion.

use serde::Serialize;
use std::fmt;

use super::foundation::{DomainError, ErrorCode, Timestamp, UserId, ValidationError};

/// Phrase a user must type to confirm account deletion.
pub const DELETE_CONFIRMATION: &str = "DELETE MY ACCOUNT";

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;

/// Public handle: 3 to 20 chars of `[a-z0-9_]`, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.trim().to_lowercase();
        let len = name.chars().count();
        if len < USERNAME_MIN || len > USERNAME_MAX {
            return Err(ValidationError::out_of_range(
                "username",
                USERNAME_MIN as i64,
                USERNAME_MAX as i64,
                len as i64,
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "username",
                "only letters, digits and underscores are allowed",
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Username claim record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsernameClaim {
    pub owner: UserId,
    pub username: Username,
    pub claimed_at: Timestamp,
}

/// Checks the typed confirmation phrase (exact match).
pub fn confirm_deletion(confirmation: &str) -> Result<(), DomainError> {
    if confirmation != DELETE_CONFIRMATION {
        return Err(DomainError::validation(
            "confirmation",
            format!("Type '{}' to confirm", DELETE_CONFIRMATION),
        ));
    }
    Ok(())
}

/// What an account deletion removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountDeletionReport {
    pub reviews_deleted: u32,
    pub profile_deleted: bool,
    pub role_deleted: bool,
    pub username_deleted: bool,
    pub reminders_deleted: u32,
    pub usage_deleted: bool,
    /// The identity-provider account is left in place.
    pub auth_account_deleted: bool,
}

/// Error for a handle someone else already holds.
pub fn username_taken(username: &Username) -> DomainError {
    DomainError::new(
        ErrorCode::Conflict,
        format!("Username '{}' is already taken", username),
    )
    .with_detail("field", "username")
}
