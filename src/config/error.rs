//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Token issuer must use HTTPS in production")]
    IssuerMustBeHttps,

    #[error("Invalid OpenAI base URL")]
    InvalidAiBaseUrl,

    #[error("Invalid AI polling settings")]
    InvalidPolling,

    #[error("Storage needs either a Supabase project or a local directory")]
    NoImageStore,

    #[error("Upload size limit must be positive")]
    InvalidUploadLimit,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Usage limits must be positive and daily must not exceed monthly")]
    InvalidUsageLimits,

    #[error("UTC offset must be within ±14 hours")]
    InvalidUtcOffset,
}
