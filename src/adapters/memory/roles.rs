//! In-memory role table and role cache.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::role::UserRole;
use crate::ports::{RoleCache, RoleRepository};

fn poisoned() -> DomainError {
    DomainError::new(ErrorCode::InternalError, "role store lock poisoned")
}

#[derive(Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<UserId, UserRole>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_role(&self, user: &UserId) -> Result<Option<UserRole>, DomainError> {
        Ok(self.roles.read().map_err(|_| poisoned())?.get(user).copied())
    }

    async fn upsert_role(&self, user: &UserId, role: UserRole) -> Result<(), DomainError> {
        self.roles
            .write()
            .map_err(|_| poisoned())?
            .insert(user.clone(), role);
        Ok(())
    }

    async fn delete_role(&self, user: &UserId) -> Result<bool, DomainError> {
        Ok(self
            .roles
            .write()
            .map_err(|_| poisoned())?
            .remove(user)
            .is_some())
    }
}

/// Process-local role cache with a fixed time to live.
pub struct InMemoryRoleCache {
    entries: RwLock<HashMap<UserId, (UserRole, Instant)>>,
    ttl: Duration,
}

impl InMemoryRoleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl RoleCache for InMemoryRoleCache {
    async fn get(&self, user: &UserId) -> Result<Option<UserRole>, DomainError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries
            .get(user)
            .filter(|(_, stored_at)| stored_at.elapsed() < self.ttl)
            .map(|(role, _)| *role))
    }

    async fn put(&self, user: &UserId, role: UserRole) -> Result<(), DomainError> {
        self.entries
            .write()
            .map_err(|_| poisoned())?
            .insert(user.clone(), (role, Instant::now()));
        Ok(())
    }

    async fn invalidate(&self, user: &UserId) -> Result<(), DomainError> {
        self.entries.write().map_err(|_| poisoned())?.remove(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> UserId {
        UserId::new("jane@example.com").unwrap()
    }

    #[tokio::test]
    async fn repository_upserts_and_deletes() {
        let repo = InMemoryRoleRepository::new();
        assert_eq!(repo.find_role(&jane()).await.unwrap(), None);

        repo.upsert_role(&jane(), UserRole::Professional).await.unwrap();
        repo.upsert_role(&jane(), UserRole::Customer).await.unwrap();
        assert_eq!(repo.find_role(&jane()).await.unwrap(), Some(UserRole::Customer));

        assert!(repo.delete_role(&jane()).await.unwrap());
        assert!(!repo.delete_role(&jane()).await.unwrap());
    }

    #[tokio::test]
    async fn cache_entries_expire() {
        let cache = InMemoryRoleCache::new(Duration::from_millis(0));
        cache.put(&jane(), UserRole::Professional).await.unwrap();
        assert_eq!(cache.get(&jane()).await.unwrap(), None);

        let cache = InMemoryRoleCache::new(Duration::from_secs(60));
        cache.put(&jane(), UserRole::Professional).await.unwrap();
        assert_eq!(cache.get(&jane()).await.unwrap(), Some(UserRole::Professional));
        cache.invalidate(&jane()).await.unwrap();
        assert_eq!(cache.get(&jane()).await.unwrap(), None);
    }
}
