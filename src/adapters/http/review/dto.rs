//! HTTP DTOs for review endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::review::{ProfessionalRating, Review, ReviewInput};
use crate::ports::ReviewFilter;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query string for the public feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListQuery {
    pub professional: Option<String>,
    pub location: Option<String>,
    pub limit: Option<u32>,
}

impl From<ReviewListQuery> for ReviewFilter {
    fn from(q: ReviewListQuery) -> Self {
        ReviewFilter {
            professional: q.professional,
            location: q.location,
            limit: q.limit,
        }
    }
}

/// Body of `PUT /api/updateReview`: the id plus the full set of fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReviewRequest {
    pub id: String,
    #[serde(flatten)]
    pub fields: ReviewInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewIdQuery {
    pub id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A written review together with the recomputed aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWriteResponse {
    pub review: Review,
    pub rating: Option<ProfessionalRating>,
}

/// Result of a delete; `rating` is null when the last review was removed.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDeletedResponse {
    pub id: String,
    pub rating: Option<ProfessionalRating>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub public: Vec<Review>,
    pub mine: Vec<Review>,
}
