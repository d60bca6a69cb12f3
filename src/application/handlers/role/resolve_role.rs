//! ResolveRoleHandler - Query handler for an account's role.
//!
//! The role table is authoritative. The cache is read first and reconciled
//! with whatever the table says; cache failures are logged and ignored. A
//! table failure degrades to the customer role with the error attached.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::role::RoleResolution;
use crate::ports::{RoleCache, RoleRepository};

#[derive(Debug, Clone)]
pub struct ResolveRoleQuery {
    pub user_id: UserId,
}

pub struct ResolveRoleHandler {
    repository: Arc<dyn RoleRepository>,
    cache: Arc<dyn RoleCache>,
}

impl ResolveRoleHandler {
    pub fn new(repository: Arc<dyn RoleRepository>, cache: Arc<dyn RoleCache>) -> Self {
        Self { repository, cache }
    }

    pub async fn handle(&self, query: ResolveRoleQuery) -> RoleResolution {
        let user = &query.user_id;

        let cached = match self.cache.get(user).await {
            Ok(role) => role,
            Err(e) => {
                tracing::warn!(user = %user, error = %e, "role cache read failed");
                None
            }
        };

        match self.repository.find_role(user).await {
            Ok(Some(role)) => {
                if cached != Some(role) {
                    if let Err(e) = self.cache.put(user, role).await {
                        tracing::warn!(user = %user, error = %e, "role cache refresh failed");
                    }
                }
                RoleResolution::found(role)
            }
            Ok(None) => {
                if cached.is_some() {
                    if let Err(e) = self.cache.invalidate(user).await {
                        tracing::warn!(user = %user, error = %e, "role cache invalidation failed");
                    }
                }
                RoleResolution::missing()
            }
            Err(e) => {
                tracing::error!(user = %user, error = %e, "role lookup failed");
                RoleResolution::degraded(e.message)
            }
        }
    }
}
