//! Review persistence and the rating aggregate read side.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReviewId, UserId};
use crate::domain::review::{ProfessionalKey, ProfessionalRating, Review};

/// Filters for the public review feed.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    /// Substring match on professional name (case-insensitive).
    pub professional: Option<String>,
    /// Substring match on location (case-insensitive).
    pub location: Option<String>,
    pub limit: Option<u32>,
}

impl ReviewFilter {
    pub const DEFAULT_LIMIT: u32 = 50;
    pub const MAX_LIMIT: u32 = 200;

    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn matches(&self, review: &Review) -> bool {
        fn contains(hay: &str, needle: &Option<String>) -> bool {
            match needle.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
                Some(n) => hay.to_lowercase().contains(&n.to_lowercase()),
                None => true,
            }
        }
        review.is_public
            && contains(&review.professional_name, &self.professional)
            && contains(review.location.as_deref().unwrap_or(""), &self.location)
    }
}

/// Review writes. Each write and the matching aggregate adjustment commit
/// together or not at all.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Stores a new review and adds its rating to the aggregate.
    ///
    /// Returns the professional's aggregate after the write.
    async fn insert(&self, review: &Review) -> Result<ProfessionalRating, DomainError>;

    /// Replaces `previous` with `updated` and adjusts the aggregate(s).
    ///
    /// Returns the aggregate of the updated review's professional.
    async fn update(
        &self,
        previous: &Review,
        updated: &Review,
    ) -> Result<Option<ProfessionalRating>, DomainError>;

    /// Removes a review and its rating from the aggregate.
    ///
    /// Returns `None` when the aggregate was deleted (no reviews left).
    async fn delete(&self, review: &Review) -> Result<Option<ProfessionalRating>, DomainError>;

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError>;

    /// Public reviews, newest first.
    async fn list_public(&self, filter: &ReviewFilter) -> Result<Vec<Review>, DomainError>;

    /// All reviews by one author, newest first.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Review>, DomainError>;
}

/// Aggregate ratings read side.
#[async_trait]
pub trait RatingReader: Send + Sync {
    /// All aggregates, best first (average, then review count).
    async fn list_ratings(&self) -> Result<Vec<ProfessionalRating>, DomainError>;

    async fn find_rating(
        &self,
        key: &ProfessionalKey,
    ) -> Result<Option<ProfessionalRating>, DomainError>;
}

/// Sorts aggregates best first.
pub fn sort_ratings(ratings: &mut [ProfessionalRating]) {
    ratings.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.total_reviews.cmp(&a.total_reviews))
            .then_with(|| a.key.cmp(&b.key))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{StarRating, Timestamp};
    use crate::domain::review::{RatedProfessional, ReviewDraft, ReviewInput};

    fn review(name: &str, location: &str, public: bool) -> Review {
        let draft = ReviewDraft::new(ReviewInput {
            professional_name: name.into(),
            location: Some(location.into()),
            service_type: "Cut".into(),
            rating: 4,
            title: "ok".into(),
            body: "ok".into(),
            is_public: public,
            ..Default::default()
        })
        .unwrap();
        Review::create(UserId::new("a@example.com").unwrap(), draft, Timestamp::now())
    }

    #[test]
    fn filter_hides_private_reviews() {
        assert!(!ReviewFilter::default().matches(&review("Jane", "Austin", false)));
        assert!(ReviewFilter::default().matches(&review("Jane", "Austin", true)));
    }

    #[test]
    fn filter_matches_substrings() {
        let filter = ReviewFilter {
            professional: Some("jan".into()),
            location: Some("AUS".into()),
            limit: None,
        };
        assert!(filter.matches(&review("Jane", "Austin, TX", true)));
        assert!(!filter.matches(&review("Mo", "Austin, TX", true)));
    }

    #[test]
    fn limit_is_clamped() {
        let filter = ReviewFilter {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(filter.effective_limit(), ReviewFilter::MAX_LIMIT);
        assert_eq!(ReviewFilter::default().effective_limit(), 50);
    }

    #[test]
    fn ratings_sort_by_average_then_count() {
        let now = Timestamp::now();
        let stars = |v| StarRating::new(v).unwrap();
        let a = ProfessionalRating::first(&RatedProfessional::new("A", "", None), stars(4), now);
        let b = ProfessionalRating::first(&RatedProfessional::new("B", "", None), stars(5), now);
        let c = ProfessionalRating::first(&RatedProfessional::new("C", "", None), stars(4), now)
            .with_added(stars(4), now);
        let mut list = vec![a, b, c];
        sort_ratings(&mut list);
        let names: Vec<_> = list.iter().map(|r| r.professional_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }
}
