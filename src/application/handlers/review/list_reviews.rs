//! Review feed and leaderboard queries.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::review::{ProfessionalRating, Review};
use crate::ports::{sort_ratings, RatingReader, ReviewFilter, ReviewRepository};

/// The public feed and the caller's own reviews, fetched together.
#[derive(Debug, Clone)]
pub struct DashboardReviews {
    pub public: Vec<Review>,
    pub mine: Vec<Review>,
}

pub struct ListReviewsHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl ListReviewsHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn public(&self, filter: &ReviewFilter) -> Result<Vec<Review>, DomainError> {
        self.reviews.list_public(filter).await
    }

    /// All of the caller's reviews, private ones included.
    pub async fn mine(&self, user: &UserId) -> Result<Vec<Review>, DomainError> {
        self.reviews.list_by_author(user).await
    }

    /// Runs both reads concurrently; either failing fails the whole request.
    pub async fn dashboard(
        &self,
        user: &UserId,
        filter: &ReviewFilter,
    ) -> Result<DashboardReviews, DomainError> {
        let (public, mine) = futures::try_join!(
            self.reviews.list_public(filter),
            self.reviews.list_by_author(user)
        )?;
        Ok(DashboardReviews { public, mine })
    }
}

/// Leaderboard of aggregate ratings, best first.
pub struct ListRatingsHandler {
    ratings: Arc<dyn RatingReader>,
}

impl ListRatingsHandler {
    pub fn new(ratings: Arc<dyn RatingReader>) -> Self {
        Self { ratings }
    }

    pub async fn handle(&self) -> Result<Vec<ProfessionalRating>, DomainError> {
        let mut ratings = self.ratings.list_ratings().await?;
        sort_ratings(&mut ratings);
        Ok(ratings)
    }
}
