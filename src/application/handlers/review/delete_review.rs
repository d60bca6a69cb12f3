//! DeleteReviewHandler - Command handler for removing one's own review.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, OwnedByUser, ReviewId, UserId};
use crate::domain::review::ProfessionalRating;
use crate::ports::ReviewRepository;

#[derive(Debug, Clone)]
pub struct DeleteReviewCommand {
    pub review_id: ReviewId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct DeleteReviewResult {
    pub review_id: ReviewId,
    /// `None` when the last review of the professional was removed.
    pub rating: Option<ProfessionalRating>,
}

pub struct DeleteReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl DeleteReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, cmd: DeleteReviewCommand) -> Result<DeleteReviewResult, DomainError> {
        let review = self
            .reviews
            .find_by_id(cmd.review_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))?;
        review.check_ownership(&cmd.user_id)?;

        let rating = self.reviews.delete(&review).await?;

        tracing::info!(review_id = %review.id, user = %cmd.user_id, "review deleted");
        Ok(DeleteReviewResult {
            review_id: review.id,
            rating,
        })
    }
}
