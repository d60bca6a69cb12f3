//! HTTP routes for review endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    create_review, dashboard_reviews, delete_review, list_my_reviews, list_public_reviews,
    list_ratings, update_review,
};

/// Review and rating routes.
///
/// - `GET /api/reviews` - public feed
/// - `GET /api/reviews/mine` - caller's reviews
/// - `GET /api/reviews/dashboard` - both of the above
/// - `POST /api/createReview`, `PUT /api/updateReview`, `DELETE /api/deleteReview`
/// - `GET /api/barbers` - aggregate ratings
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", get(list_public_reviews))
        .route("/api/reviews/mine", get(list_my_reviews))
        .route("/api/reviews/dashboard", get(dashboard_reviews))
        .route("/api/createReview", post(create_review))
        .route("/api/updateReview", put(update_review))
        .route("/api/deleteReview", delete(delete_review))
        .route("/api/barbers", get(list_ratings))
}
