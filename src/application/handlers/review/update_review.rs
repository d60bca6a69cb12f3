//! UpdateReviewHandler - Command handler for editing one's own review.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, OwnedByUser, ReviewId, Timestamp, UserId};
use crate::domain::review::{ProfessionalRating, Review, ReviewDraft, ReviewInput};
use crate::ports::ReviewRepository;

#[derive(Debug, Clone)]
pub struct UpdateReviewCommand {
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub input: ReviewInput,
}

#[derive(Debug, Clone)]
pub struct UpdateReviewResult {
    pub review: Review,
    /// Aggregate of the professional the review now counts towards.
    pub rating: Option<ProfessionalRating>,
}

pub struct UpdateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl UpdateReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, cmd: UpdateReviewCommand) -> Result<UpdateReviewResult, DomainError> {
        let draft = ReviewDraft::new(cmd.input)?;

        let existing = self
            .reviews
            .find_by_id(cmd.review_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))?;
        existing.check_ownership(&cmd.user_id)?;

        let updated = existing.revised(draft, Timestamp::now());
        let rating = self.reviews.update(&existing, &updated).await?;

        tracing::info!(review_id = %updated.id, user = %cmd.user_id, "review updated");
        Ok(UpdateReviewResult {
            review: updated,
            rating,
        })
    }
}
