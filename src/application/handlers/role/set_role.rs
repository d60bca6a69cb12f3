//! SetRoleHandler - Command handler writing an account's role through to the
//! table, then the cache.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::role::UserRole;
use crate::ports::{RoleCache, RoleRepository};

#[derive(Debug, Clone)]
pub struct SetRoleCommand {
    pub user_id: UserId,
    pub role: UserRole,
}

pub struct SetRoleHandler {
    repository: Arc<dyn RoleRepository>,
    cache: Arc<dyn RoleCache>,
}

impl SetRoleHandler {
    pub fn new(repository: Arc<dyn RoleRepository>, cache: Arc<dyn RoleCache>) -> Self {
        Self { repository, cache }
    }

    pub async fn handle(&self, cmd: SetRoleCommand) -> Result<UserRole, DomainError> {
        self.repository.upsert_role(&cmd.user_id, cmd.role).await?;

        if let Err(e) = self.cache.put(&cmd.user_id, cmd.role).await {
            tracing::warn!(user = %cmd.user_id, error = %e, "role cache write failed");
            // A stale entry would outlive the write; drop it instead.
            if let Err(e) = self.cache.invalidate(&cmd.user_id).await {
                tracing::warn!(user = %cmd.user_id, error = %e, "role cache invalidation failed");
            }
        }

        tracing::info!(user = %cmd.user_id, role = %cmd.role, "role updated");
        Ok(cmd.role)
    }
}
