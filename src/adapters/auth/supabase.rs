//! Supabase Auth adapter for JWT validation.
//!
//! Supabase signs access tokens with the project's JWT secret (HS256). This
//! adapter validates:
//!
//! - **Signature** against the shared secret
//! - **Expiry (exp)**: must be in the future
//! - **Audience (aud)**: must contain the configured audience (`authenticated`)
//! - **Issuer (iss)**: only when an issuer is configured
//!
//! The account identity is the token's `email` claim, normalized.
//!
//! ```ignore
//! let config = SupabaseAuthConfig::new(secret).with_issuer("https://xyz.supabase.co/auth/v1");
//! let validator = SupabaseSessionValidator::new(config);
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, TokenData, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

#[derive(Debug, Clone)]
pub struct SupabaseAuthConfig {
    jwt_secret: Secret<String>,
    pub issuer: Option<String>,
    pub audience: String,
}

impl SupabaseAuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Secret::new(jwt_secret.into()),
            issuer: None,
            audience: "authenticated".to_string(),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }
}

/// Claims carried by a Supabase access token.
#[derive(Debug, Serialize, Deserialize)]
struct SupabaseClaims {
    sub: String,

    exp: i64,

    #[serde(default)]
    email: Option<String>,

    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,

    #[serde(default)]
    name: Option<String>,
}

pub struct SupabaseSessionValidator {
    config: SupabaseAuthConfig,
    decoding_key: DecodingKey,
}

impl SupabaseSessionValidator {
    pub fn new(config: SupabaseAuthConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        validation
    }

    fn decode(&self, token: &str) -> Result<TokenData<SupabaseClaims>, AuthError> {
        decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    tracing::warn!("Token rejected: {}", e);
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }
}

#[async_trait]
impl SessionValidator for SupabaseSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode(token)?.claims;

        let email = claims
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(AuthError::MissingEmail)?;
        let id = UserId::new(email).map_err(|_| AuthError::MissingEmail)?;

        let display_name = claims
            .user_metadata
            .and_then(|m| m.full_name.or(m.name))
            .filter(|n| !n.trim().is_empty());

        Ok(AuthenticatedUser::new(id, claims.sub, display_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        aud: &'a str,
        exp: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        iss: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<&'a str>,
        user_metadata: serde_json::Value,
    }

    fn future() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    fn token(claims: &TestClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims<'a>() -> TestClaims<'a> {
        TestClaims {
            sub: "0b7c-uuid",
            aud: "authenticated",
            exp: future(),
            iss: None,
            email: Some("Jane@Example.com"),
            user_metadata: serde_json::json!({ "full_name": "Jane Doe" }),
        }
    }

    fn validator() -> SupabaseSessionValidator {
        SupabaseSessionValidator::new(SupabaseAuthConfig::new(SECRET))
    }

    #[tokio::test]
    async fn valid_token_yields_normalized_email() {
        let user = validator().validate(&token(&claims(), SECRET)).await.unwrap();
        assert_eq!(user.email(), "jane@example.com");
        assert_eq!(user.subject, "0b7c-uuid");
        assert_eq!(user.display_name.as_deref(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let result = validator()
            .validate(&token(&claims(), "some-other-secret-value-of-enough-length"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_is_reported() {
        let mut c = claims();
        c.exp = chrono::Utc::now().timestamp() - 3600;
        let result = validator().validate(&token(&c, SECRET)).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let mut c = claims();
        c.aud = "anon";
        let result = validator().validate(&token(&c, SECRET)).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn token_without_email_is_rejected() {
        let mut c = claims();
        c.email = None;
        let result = validator().validate(&token(&c, SECRET)).await;
        assert!(matches!(result, Err(AuthError::MissingEmail)));
    }

    #[tokio::test]
    async fn issuer_is_checked_when_configured() {
        let validator = SupabaseSessionValidator::new(
            SupabaseAuthConfig::new(SECRET).with_issuer("https://proj.supabase.co/auth/v1"),
        );
        let mut c = claims();
        c.iss = Some("https://evil.example.com");
        assert!(validator.validate(&token(&c, SECRET)).await.is_err());

        c.iss = Some("https://proj.supabase.co/auth/v1");
        assert!(validator.validate(&token(&c, SECRET)).await.is_ok());
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert!(matches!(
            validator().validate("not-a-jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
