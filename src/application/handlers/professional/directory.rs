//! Public directory of professionals.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ProfileId};
use crate::domain::professional::{
    rank_directory, DirectoryFilter, ProfessionalProfile, PublicProfile,
};
use crate::ports::{PortfolioRepository, ProfileRepository, RatingReader, ServiceRepository};

/// Lists profiles matching the filter, ranked for display.
pub struct ListProfessionalsHandler {
    profiles: Arc<dyn ProfileRepository>,
    ratings: Arc<dyn RatingReader>,
}

impl ListProfessionalsHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, ratings: Arc<dyn RatingReader>) -> Self {
        Self { profiles, ratings }
    }

    pub async fn handle(
        &self,
        filter: &DirectoryFilter,
    ) -> Result<Vec<ProfessionalProfile>, DomainError> {
        let (profiles, ratings) =
            futures::try_join!(self.profiles.list_profiles(), self.ratings.list_ratings())?;
        let ratings: HashMap<_, _> = ratings.into_iter().map(|r| (r.key.clone(), r)).collect();

        let mut listed: Vec<ProfessionalProfile> = profiles
            .into_iter()
            .filter(|p| filter.matches(p))
            .map(|p| {
                let rating = ratings.get(&p.rating_key());
                p.with_rating(rating)
            })
            .collect();
        rank_directory(&mut listed);
        Ok(listed)
    }
}

/// Loads one profile with its services and portfolio.
pub struct GetPublicProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
    services: Arc<dyn ServiceRepository>,
    portfolio: Arc<dyn PortfolioRepository>,
    ratings: Arc<dyn RatingReader>,
}

impl GetPublicProfileHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        services: Arc<dyn ServiceRepository>,
        portfolio: Arc<dyn PortfolioRepository>,
        ratings: Arc<dyn RatingReader>,
    ) -> Self {
        Self {
            profiles,
            services,
            portfolio,
            ratings,
        }
    }

    pub async fn handle(&self, id: ProfileId) -> Result<PublicProfile, DomainError> {
        let profile = self
            .profiles
            .find_profile(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Professional profile"))?;

        let key = profile.rating_key();
        let (services, portfolio, rating) = futures::try_join!(
            self.services.list_services(id),
            self.portfolio.list_items(id),
            self.ratings.find_rating(&key),
        )?;

        Ok(PublicProfile {
            profile: profile.with_rating(rating.as_ref()),
            services,
            portfolio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProfessionalStore, InMemoryReviewStore};
    use crate::domain::foundation::{ErrorCode, Timestamp, UserId};
    use crate::domain::professional::{ProfileDraft, ProfileInput, Service, ServiceDraft, ServiceInput};
    use crate::domain::review::{Review, ReviewDraft, ReviewInput};
    use crate::ports::ReviewRepository;

    fn profile(name: &str, city: &str, verified: bool) -> ProfessionalProfile {
        let draft = ProfileDraft::new(ProfileInput {
            business_name: name.into(),
            city: Some(city.into()),
            specialties: vec!["Braids".into()],
            ..Default::default()
        })
        .unwrap();
        let mut p = ProfessionalProfile::create(
            UserId::new(format!("{}@example.com", name.to_lowercase())).unwrap(),
            draft,
            Timestamp::now(),
        );
        p.is_verified = verified;
        p
    }

    async fn review(store: &InMemoryReviewStore, name: &str, rating: i64) {
        let draft = ReviewDraft::new(ReviewInput {
            professional_name: name.into(),
            service_type: "Braids".into(),
            rating,
            title: "t".into(),
            body: "b".into(),
            is_public: true,
            ..Default::default()
        })
        .unwrap();
        let r = Review::create(UserId::new("c@example.com").unwrap(), draft, Timestamp::now());
        store.insert(&r).await.unwrap();
    }

    #[tokio::test]
    async fn directory_filters_and_ranks() {
        let profiles = Arc::new(InMemoryProfessionalStore::new());
        let reviews = Arc::new(InMemoryReviewStore::new());
        for p in [
            profile("Alpha", "Austin", false),
            profile("Beta", "Austin", true),
            profile("Gamma", "Austin", false),
            profile("Delta", "Dallas", true),
        ] {
            profiles.insert_profile(&p).await.unwrap();
        }
        review(&reviews, "Gamma", 5).await;
        review(&reviews, "Alpha", 2).await;

        let listed = ListProfessionalsHandler::new(profiles, reviews)
            .handle(&DirectoryFilter {
                city: Some("austin".into()),
                specialty: None,
            })
            .await
            .unwrap();

        let names: Vec<_> = listed.iter().map(|p| p.business_name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Gamma", "Alpha"]);
        assert_eq!(listed[1].average_rating, 5.0);
    }

    #[tokio::test]
    async fn public_profile_includes_services() {
        let profiles = Arc::new(InMemoryProfessionalStore::new());
        let reviews = Arc::new(InMemoryReviewStore::new());
        let p = profile("Alpha", "Austin", false);
        profiles.insert_profile(&p).await.unwrap();
        let service = Service::create(
            p.id,
            ServiceDraft::new(ServiceInput {
                name: "Box braids".into(),
                ..Default::default()
            })
            .unwrap(),
            Timestamp::now(),
        );
        profiles.insert_service(&service).await.unwrap();

        let handler = GetPublicProfileHandler::new(
            profiles.clone(),
            profiles.clone(),
            profiles.clone(),
            reviews,
        );
        let page = handler.handle(p.id).await.unwrap();
        assert_eq!(page.services.len(), 1);
        assert!(page.portfolio.is_empty());

        let err = handler.handle(ProfileId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
