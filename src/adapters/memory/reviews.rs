//! In-memory review store with its rating aggregates.
//!
//! Review rows and aggregates live behind one mutex, so a write and its
//! aggregate adjustment are applied as a single step.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, ReviewId, Timestamp, UserId};
use crate::domain::review::{
    adjustments_for_update, ProfessionalKey, ProfessionalRating, RatingAdjustment, Review,
};
use crate::ports::{sort_ratings, RatingReader, ReviewFilter, ReviewRepository};

#[derive(Default)]
struct ReviewState {
    reviews: HashMap<ReviewId, Review>,
    ratings: HashMap<ProfessionalKey, ProfessionalRating>,
}

impl ReviewState {
    fn adjust(&mut self, adjustment: &RatingAdjustment, now: Timestamp) {
        let key = adjustment.key();
        match adjustment.apply(self.ratings.get(&key), now) {
            Some(rating) => {
                self.ratings.insert(key, rating);
            }
            None => {
                self.ratings.remove(&key);
            }
        }
    }
}

/// Review repository and rating reader backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryReviewStore {
    state: Mutex<ReviewState>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ReviewState>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "review store lock poisoned"))
    }
}

fn newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl ReviewRepository for InMemoryReviewStore {
    async fn insert(&self, review: &Review) -> Result<ProfessionalRating, DomainError> {
        let mut state = self.lock()?;
        if state.reviews.contains_key(&review.id) {
            return Err(DomainError::new(ErrorCode::Conflict, "Review already exists"));
        }
        let professional = review.professional();
        let key = professional.key();
        state.reviews.insert(review.id, review.clone());
        state.adjust(
            &RatingAdjustment::Added {
                professional,
                rating: review.rating,
            },
            review.updated_at,
        );
        state
            .ratings
            .get(&key)
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::InternalError, "aggregate missing after insert"))
    }

    async fn update(
        &self,
        previous: &Review,
        updated: &Review,
    ) -> Result<Option<ProfessionalRating>, DomainError> {
        let mut state = self.lock()?;
        // Re-read under the lock so a concurrent edit cannot be double counted.
        let stored = state
            .reviews
            .get(&previous.id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Review"))?;

        let adjustments = adjustments_for_update(
            (&stored.professional(), stored.rating),
            (&updated.professional(), updated.rating),
        );
        state.reviews.insert(updated.id, updated.clone());
        for adjustment in &adjustments {
            state.adjust(adjustment, updated.updated_at);
        }
        Ok(state.ratings.get(&updated.professional().key()).cloned())
    }

    async fn delete(&self, review: &Review) -> Result<Option<ProfessionalRating>, DomainError> {
        let mut state = self.lock()?;
        let stored = state
            .reviews
            .remove(&review.id)
            .ok_or_else(|| DomainError::not_found("Review"))?;
        let key = stored.professional().key();
        state.adjust(
            &RatingAdjustment::Removed {
                key: key.clone(),
                rating: stored.rating,
            },
            Timestamp::now(),
        );
        Ok(state.ratings.get(&key).cloned())
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        Ok(self.lock()?.reviews.get(&id).cloned())
    }

    async fn list_public(&self, filter: &ReviewFilter) -> Result<Vec<Review>, DomainError> {
        let state = self.lock()?;
        let mut reviews: Vec<Review> = state
            .reviews
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        newest_first(&mut reviews);
        reviews.truncate(filter.effective_limit() as usize);
        Ok(reviews)
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Review>, DomainError> {
        let state = self.lock()?;
        let mut reviews: Vec<Review> = state
            .reviews
            .values()
            .filter(|r| &r.author == author)
            .cloned()
            .collect();
        newest_first(&mut reviews);
        Ok(reviews)
    }
}

#[async_trait]
impl RatingReader for InMemoryReviewStore {
    async fn list_ratings(&self) -> Result<Vec<ProfessionalRating>, DomainError> {
        let mut ratings: Vec<ProfessionalRating> = self.lock()?.ratings.values().cloned().collect();
        sort_ratings(&mut ratings);
        Ok(ratings)
    }

    async fn find_rating(
        &self,
        key: &ProfessionalKey,
    ) -> Result<Option<ProfessionalRating>, DomainError> {
        Ok(self.lock()?.ratings.get(key).cloned())
    }
}
