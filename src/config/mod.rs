//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `STYLEBOARD` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use styleboard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod auth;
mod database;
mod email;
mod error;
mod redis;
mod server;
mod storage;
mod usage;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};
pub use usage::{ClientConfig, UsageConfig};

use serde::Deserialize;

/// Root application configuration.
///
/// `database`, `redis` and `email` are optional sections: without them the
/// server runs on in-memory stores, an in-process role cache and no reminder
/// dispatch respectively.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub redis: Option<RedisConfig>,

    pub auth: AuthConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub email: Option<EmailConfig>,

    #[serde(default)]
    pub usage: UsageConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `STYLEBOARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `STYLEBOARD__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `STYLEBOARD__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STYLEBOARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section that is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        if let Some(redis) = &self.redis {
            redis.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        self.storage.validate()?;
        if let Some(email) = &self.email {
            email.validate()?;
        }
        self.usage.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
