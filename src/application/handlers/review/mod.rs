//! Review command and query handlers.

mod create_review;
mod delete_review;
mod list_reviews;
mod update_review;

pub use create_review::{CreateReviewCommand, CreateReviewHandler, CreateReviewResult};
pub use delete_review::{DeleteReviewCommand, DeleteReviewHandler, DeleteReviewResult};
pub use list_reviews::{DashboardReviews, ListRatingsHandler, ListReviewsHandler};
pub use update_review::{UpdateReviewCommand, UpdateReviewHandler, UpdateReviewResult};
