//! Redis configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Redis backs the role cache. Without this section the cache is in-process.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,

    /// How long a cached role stays valid, in seconds
    #[serde(default = "default_role_cache_ttl")]
    pub role_cache_ttl_secs: u64,
}

impl RedisConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        Ok(())
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            role_cache_ttl_secs: default_role_cache_ttl(),
        }
    }
}

pub(super) fn default_role_cache_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(RedisConfig::default().role_cache_ttl_secs, 3600);
    }

    #[test]
    fn test_url_validation() {
        let mut config = RedisConfig::default();
        assert_eq!(config.validate(), Err(ValidationError::MissingRequired("REDIS__URL")));

        config.url = "http://localhost:6379".to_string();
        assert_eq!(config.validate(), Err(ValidationError::InvalidRedisUrl));

        config.url = "rediss://cache.internal:6380".to_string();
        assert!(config.validate().is_ok());
    }
}
