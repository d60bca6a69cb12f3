//! Session validation port for access token validation.
//!
//! The identity provider issues a JWT per signed-in browser session. This
//! port turns that token into an `AuthenticatedUser` keyed by email. The
//! Supabase adapter checks signature, expiry and audience; the mock adapter
//! maps fixed tokens to users for tests.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed or badly signed tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::MissingEmail` when no email claim is present
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
