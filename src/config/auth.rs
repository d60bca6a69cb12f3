//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Supabase Auth token validation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret the project signs access tokens with
    pub jwt_secret: String,

    /// Expected `iss`, e.g. `https://<project>.supabase.co/auth/v1`
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected `aud`
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl AuthConfig {
    /// In production an issuer, when set, must be HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.audience.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        if let Some(issuer) = &self.issuer {
            if *environment == Environment::Production && !issuer.starts_with("https://") {
                return Err(ValidationError::IssuerMustBeHttps);
            }
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: None,
            audience: default_audience(),
        }
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
