//! CreateReviewHandler - Command handler for submitting a review.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::review::{ProfessionalRating, Review, ReviewDraft, ReviewInput};
use crate::ports::ReviewRepository;

#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub author: UserId,
    pub input: ReviewInput,
}

/// The stored review and the professional's aggregate after it counted.
#[derive(Debug, Clone)]
pub struct CreateReviewResult {
    pub review: Review,
    pub rating: ProfessionalRating,
}

pub struct CreateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl CreateReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, cmd: CreateReviewCommand) -> Result<CreateReviewResult, DomainError> {
        let draft = ReviewDraft::new(cmd.input)?;
        let review = Review::create(cmd.author, draft, Timestamp::now());
        let rating = self.reviews.insert(&review).await?;

        tracing::info!(
            review_id = %review.id,
            user = %review.author,
            professional = %rating.key,
            "review created"
        );
        Ok(CreateReviewResult { review, rating })
    }
}
