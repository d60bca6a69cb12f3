//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a JWT. They have
//! no provider dependencies: the Supabase validator and the test mock both
//! populate them through the `SessionValidator` port.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated JWT.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Account identity (normalized email).
    pub id: UserId,

    /// Subject claim issued by the identity provider.
    pub subject: String,

    /// Display name if the provider sent one in user metadata.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, subject: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            display_name,
        }
    }

    /// Email address of the user.
    pub fn email(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The token carries no usable email claim.
    #[error("Token has no email claim")]
    MissingEmail,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::MissingEmail
        )
    }
}
