//! Username claim and lookup.

use std::sync::Arc;

use crate::domain::account::{Username, UsernameClaim};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::UsernameRepository;

#[derive(Debug, Clone)]
pub struct ClaimUsernameCommand {
    pub owner: UserId,
    pub username: String,
}

pub struct ClaimUsernameHandler {
    usernames: Arc<dyn UsernameRepository>,
}

impl ClaimUsernameHandler {
    pub fn new(usernames: Arc<dyn UsernameRepository>) -> Self {
        Self { usernames }
    }

    /// Claims or renames the caller's handle. `Conflict` when taken.
    pub async fn handle(&self, cmd: ClaimUsernameCommand) -> Result<UsernameClaim, DomainError> {
        let claim = UsernameClaim {
            username: Username::new(&cmd.username)?,
            owner: cmd.owner,
            claimed_at: Timestamp::now(),
        };
        self.usernames.claim(&claim).await?;
        tracing::info!(user = %claim.owner, username = %claim.username, "username claimed");
        Ok(claim)
    }
}

pub struct GetUsernameHandler {
    usernames: Arc<dyn UsernameRepository>,
}

impl GetUsernameHandler {
    pub fn new(usernames: Arc<dyn UsernameRepository>) -> Self {
        Self { usernames }
    }

    pub async fn handle(&self, owner: &UserId) -> Result<Option<UsernameClaim>, DomainError> {
        self.usernames.find_by_owner(owner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUsernameRepository;
    use crate::domain::foundation::ErrorCode;

    fn cmd(owner: &str, username: &str) -> ClaimUsernameCommand {
        ClaimUsernameCommand {
            owner: UserId::new(owner).unwrap(),
            username: username.into(),
        }
    }

    #[tokio::test]
    async fn claim_then_get() {
        let repo = Arc::new(InMemoryUsernameRepository::new());
        ClaimUsernameHandler::new(repo.clone())
            .handle(cmd("a@example.com", "Jane_Doe"))
            .await
            .unwrap();

        let claim = GetUsernameHandler::new(repo)
            .handle(&UserId::new("a@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(claim.username.as_str(), "jane_doe");
    }

    #[tokio::test]
    async fn taken_username_conflicts() {
        let repo = Arc::new(InMemoryUsernameRepository::new());
        let handler = ClaimUsernameHandler::new(repo);
        handler.handle(cmd("a@example.com", "jane")).await.unwrap();

        let err = handler.handle(cmd("b@example.com", "JANE")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        // Re-claiming your own handle is fine.
        assert!(handler.handle(cmd("a@example.com", "jane")).await.is_ok());
    }

    #[tokio::test]
    async fn invalid_username_is_rejected() {
        let repo = Arc::new(InMemoryUsernameRepository::new());
        let err = ClaimUsernameHandler::new(repo)
            .handle(cmd("a@example.com", "no spaces"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
