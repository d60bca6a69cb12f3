//! Handlers for the caller's own professional profile.

use std::sync::Arc;

use crate::application::handlers::role::{SetRoleCommand, SetRoleHandler};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::professional::{ProfessionalProfile, ProfileDraft, ProfileInput};
use crate::domain::role::UserRole;
use crate::ports::{ProfileRepository, RatingReader, RoleCache, RoleRepository};

async fn with_rating(
    ratings: &dyn RatingReader,
    profile: ProfessionalProfile,
) -> Result<ProfessionalProfile, DomainError> {
    let rating = ratings.find_rating(&profile.rating_key()).await?;
    Ok(profile.with_rating(rating.as_ref()))
}

/// Returns the caller's profile or `NotFound`.
pub struct GetOwnProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    ratings: Arc<dyn RatingReader>,
}

impl GetOwnProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, ratings: Arc<dyn RatingReader>) -> Self {
        Self { profiles, ratings }
    }

    pub async fn handle(&self, owner: &UserId) -> Result<ProfessionalProfile, DomainError> {
        let profile = self
            .profiles
            .find_by_owner(owner)
            .await?
            .ok_or_else(|| DomainError::not_found("Professional profile"))?;
        with_rating(self.ratings.as_ref(), profile).await
    }
}

#[derive(Debug, Clone)]
pub struct CreateProfileCommand {
    pub owner: UserId,
    pub input: ProfileInput,
}

/// Creates the caller's profile and marks the account as a professional.
pub struct CreateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    ratings: Arc<dyn RatingReader>,
    set_role: SetRoleHandler,
}

impl CreateProfileHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        ratings: Arc<dyn RatingReader>,
        roles: Arc<dyn RoleRepository>,
        role_cache: Arc<dyn RoleCache>,
    ) -> Self {
        Self {
            profiles,
            ratings,
            set_role: SetRoleHandler::new(roles, role_cache),
        }
    }

    pub async fn handle(&self, cmd: CreateProfileCommand) -> Result<ProfessionalProfile, DomainError> {
        let draft = ProfileDraft::new(cmd.input)?;

        if self.profiles.find_by_owner(&cmd.owner).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Professional profile already exists",
            ));
        }

        let profile = ProfessionalProfile::create(cmd.owner.clone(), draft, Timestamp::now());
        self.profiles.insert_profile(&profile).await?;

        self.set_role
            .handle(SetRoleCommand {
                user_id: cmd.owner,
                role: UserRole::Professional,
            })
            .await?;

        tracing::info!(profile_id = %profile.id, user = %profile.owner, "professional profile created");
        with_rating(self.ratings.as_ref(), profile).await
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub owner: UserId,
    pub input: ProfileInput,
}

pub struct UpdateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    ratings: Arc<dyn RatingReader>,
}

impl UpdateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, ratings: Arc<dyn RatingReader>) -> Self {
        Self { profiles, ratings }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<ProfessionalProfile, DomainError> {
        let draft = ProfileDraft::new(cmd.input)?;
        let mut profile = self
            .profiles
            .find_by_owner(&cmd.owner)
            .await?
            .ok_or_else(|| DomainError::not_found("Professional profile"))?;

        profile.apply(draft, Timestamp::now());
        self.profiles.update_profile(&profile).await?;

        tracing::info!(profile_id = %profile.id, user = %cmd.owner, "professional profile updated");
        with_rating(self.ratings.as_ref(), profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryProfessionalStore, InMemoryReviewStore, InMemoryRoleCache, InMemoryRoleRepository,
    };
    use crate::domain::review::{Review, ReviewDraft, ReviewInput};
    use crate::ports::{ReviewRepository, RoleRepository};
    use std::time::Duration;

    struct Fixture {
        profiles: Arc<InMemoryProfessionalStore>,
        reviews: Arc<InMemoryReviewStore>,
        roles: Arc<InMemoryRoleRepository>,
        cache: Arc<InMemoryRoleCache>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                profiles: Arc::new(InMemoryProfessionalStore::new()),
                reviews: Arc::new(InMemoryReviewStore::new()),
                roles: Arc::new(InMemoryRoleRepository::new()),
                cache: Arc::new(InMemoryRoleCache::new(Duration::from_secs(60))),
            }
        }

        fn create(&self) -> CreateProfileHandler {
            CreateProfileHandler::new(
                self.profiles.clone(),
                self.reviews.clone(),
                self.roles.clone(),
                self.cache.clone(),
            )
        }
    }

    fn owner() -> UserId {
        UserId::new("mo@example.com").unwrap()
    }

    fn input(name: &str) -> ProfileInput {
        ProfileInput {
            business_name: name.into(),
            city: Some("Austin".into()),
            specialties: vec!["Fades".into(), " fades ".into(), "Beards".into()],
            price_range: Some("$$".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_sets_professional_role() {
        let fx = Fixture::new();
        let profile = fx
            .create()
            .handle(CreateProfileCommand {
                owner: owner(),
                input: input("Fresh Cuts"),
            })
            .await
            .unwrap();

        assert_eq!(profile.specialties, vec!["Fades", "Beards"]);
        assert_eq!(
            fx.roles.find_role(&owner()).await.unwrap(),
            Some(UserRole::Professional)
        );
    }

    #[tokio::test]
    async fn second_create_conflicts() {
        let fx = Fixture::new();
        let cmd = CreateProfileCommand {
            owner: owner(),
            input: input("Fresh Cuts"),
        };
        fx.create().handle(cmd.clone()).await.unwrap();
        let err = fx.create().handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let fx = Fixture::new();
        let err = GetOwnProfileHandler::new(fx.profiles.clone(), fx.reviews.clone())
            .handle(&owner())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = UpdateProfileHandler::new(fx.profiles.clone(), fx.reviews.clone())
            .handle(UpdateProfileCommand {
                owner: owner(),
                input: input("X"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn profile_carries_aggregate_rating() {
        let fx = Fixture::new();
        fx.create()
            .handle(CreateProfileCommand {
                owner: owner(),
                input: input("Fresh Cuts"),
            })
            .await
            .unwrap();

        let draft = ReviewDraft::new(ReviewInput {
            professional_name: "fresh cuts".into(),
            service_type: "Fade".into(),
            rating: 4,
            title: "t".into(),
            body: "b".into(),
            is_public: true,
            ..Default::default()
        })
        .unwrap();
        let review = Review::create(
            UserId::new("client@example.com").unwrap(),
            draft,
            Timestamp::now(),
        );
        fx.reviews.insert(&review).await.unwrap();

        let profile = GetOwnProfileHandler::new(fx.profiles.clone(), fx.reviews.clone())
            .handle(&owner())
            .await
            .unwrap();
        assert_eq!(profile.total_reviews, 1);
        assert_eq!(profile.average_rating, 4.0);
    }

    #[tokio::test]
    async fn update_applies_changes() {
        let fx = Fixture::new();
        fx.create()
            .handle(CreateProfileCommand {
                owner: owner(),
                input: input("Fresh Cuts"),
            })
            .await
            .unwrap();

        let updated = UpdateProfileHandler::new(fx.profiles.clone(), fx.reviews.clone())
            .handle(UpdateProfileCommand {
                owner: owner(),
                input: input("Fresher Cuts"),
            })
            .await
            .unwrap();
        assert_eq!(updated.business_name, "Fresher Cuts");
    }
}
