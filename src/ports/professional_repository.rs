//! Persistence for professional profiles, services and portfolio items.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PortfolioItemId, ProfileId, ServiceId, UserId};
use crate::domain::professional::{PortfolioItem, ProfessionalProfile, Service};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fails with `Conflict` when the owner already has a profile.
    async fn insert_profile(&self, profile: &ProfessionalProfile) -> Result<(), DomainError>;

    /// Fails with `NotFound` when the profile does not exist.
    async fn update_profile(&self, profile: &ProfessionalProfile) -> Result<(), DomainError>;

    async fn find_by_owner(&self, owner: &UserId)
        -> Result<Option<ProfessionalProfile>, DomainError>;

    async fn find_profile(&self, id: ProfileId) -> Result<Option<ProfessionalProfile>, DomainError>;

    /// Every profile. Directory filtering and ranking happen in the caller.
    async fn list_profiles(&self) -> Result<Vec<ProfessionalProfile>, DomainError>;

    /// Deletes the owner's profile together with its services and portfolio.
    ///
    /// Returns the deleted profile so callers can clean up stored images.
    async fn delete_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<(ProfessionalProfile, Vec<PortfolioItem>)>, DomainError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn insert_service(&self, service: &Service) -> Result<(), DomainError>;

    async fn update_service(&self, service: &Service) -> Result<(), DomainError>;

    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>, DomainError>;

    /// Services of one profile, by name.
    async fn list_services(&self, profile: ProfileId) -> Result<Vec<Service>, DomainError>;

    async fn delete_service(&self, id: ServiceId) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn insert_item(&self, item: &PortfolioItem) -> Result<(), DomainError>;

    async fn update_item(&self, item: &PortfolioItem) -> Result<(), DomainError>;

    async fn find_item(&self, id: PortfolioItemId) -> Result<Option<PortfolioItem>, DomainError>;

    /// Items of one profile in display order.
    async fn list_items(&self, profile: ProfileId) -> Result<Vec<PortfolioItem>, DomainError>;

    async fn delete_item(&self, id: PortfolioItemId) -> Result<bool, DomainError>;
}
