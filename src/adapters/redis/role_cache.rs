//! Redis-backed role cache shared across server instances.
//!
//! Roles are stored as plain strings under `styleboard:role:{email}` with a
//! fixed expiry, so a missed invalidation heals itself.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::role::UserRole;
use crate::ports::RoleCache;

#[derive(Clone)]
pub struct RedisRoleCache {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisRoleCache {
    pub fn new(conn: MultiplexedConnection, ttl_secs: u64) -> Self {
        Self { conn, ttl_secs }
    }

    /// Opens a multiplexed connection to `url`.
    pub async fn connect(url: &str, ttl_secs: u64) -> Result<Self, DomainError> {
        let client = redis::Client::open(url).map_err(cache_error)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(cache_error)?;
        Ok(Self::new(conn, ttl_secs))
    }
}

fn key_for(user: &UserId) -> String {
    format!("styleboard:role:{}", user)
}

fn cache_error(e: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::CacheError, format!("Redis error: {}", e))
}

#[async_trait]
impl RoleCache for RedisRoleCache {
    async fn get(&self, user: &UserId) -> Result<Option<UserRole>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key_for(user)).await.map_err(cache_error)?;
        // Unparseable entries count as a miss.
        Ok(raw.and_then(|r| r.parse().ok()))
    }

    async fn put(&self, user: &UserId, role: UserRole) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key_for(user), role.as_str(), self.ttl_secs)
            .await
            .map_err(cache_error)
    }

    async fn invalidate(&self, user: &UserId) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key_for(user)).await.map_err(cache_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_email() {
        let user = UserId::new("Jane@Example.com").unwrap();
        assert_eq!(key_for(&user), "styleboard:role:jane@example.com");
    }
}
