//! Professional profile, directory, services and portfolio handlers.

mod directory;
mod portfolio;
mod profile;
mod services;

pub use directory::{GetPublicProfileHandler, ListProfessionalsHandler};
pub use portfolio::{ManagePortfolioHandler, SavePortfolioItemCommand};
pub(crate) use portfolio::remove_stored_image;
pub use profile::{
    CreateProfileCommand, CreateProfileHandler, GetOwnProfileHandler, UpdateProfileCommand,
    UpdateProfileHandler,
};
pub use services::{ManageServicesHandler, SaveServiceCommand};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::professional::ProfessionalProfile;
use crate::ports::ProfileRepository;

/// The caller's profile, or `NotFound` when they have none.
async fn own_profile(
    profiles: &dyn ProfileRepository,
    owner: &UserId,
) -> Result<ProfessionalProfile, DomainError> {
    profiles
        .find_by_owner(owner)
        .await?
        .ok_or_else(|| DomainError::not_found("Professional profile"))
}
