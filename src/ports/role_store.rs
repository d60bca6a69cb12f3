//! Role storage: the authoritative table plus a read-through cache.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::role::UserRole;

/// Authoritative role records, one per account.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_role(&self, user: &UserId) -> Result<Option<UserRole>, DomainError>;

    /// Inserts or replaces the account's role.
    async fn upsert_role(&self, user: &UserId, role: UserRole) -> Result<(), DomainError>;

    /// Returns whether a record existed.
    async fn delete_role(&self, user: &UserId) -> Result<bool, DomainError>;
}

/// Short-lived copy of role records. Failures here never fail a request.
#[async_trait]
pub trait RoleCache: Send + Sync {
    async fn get(&self, user: &UserId) -> Result<Option<UserRole>, DomainError>;

    async fn put(&self, user: &UserId, role: UserRole) -> Result<(), DomainError>;

    async fn invalidate(&self, user: &UserId) -> Result<(), DomainError>;
}
