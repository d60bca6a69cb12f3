//! HTTP handlers for review endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{ApiJson, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    CreateReviewCommand, DeleteReviewCommand, UpdateReviewCommand,
};
use crate::domain::foundation::ReviewId;
use crate::domain::review::ReviewInput;
use crate::ports::ReviewFilter;

use super::dto::{
    DashboardResponse, ReviewDeletedResponse, ReviewIdQuery, ReviewListQuery,
    ReviewWriteResponse, UpdateReviewRequest,
};

/// `GET /api/reviews` - public feed.
pub async fn list_public_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = ReviewFilter::from(query);
    let reviews = state.list_reviews_handler().public(&filter).await?;
    Ok(Json(reviews))
}

/// `GET /api/reviews/mine` - the caller's own reviews, public or not.
pub async fn list_my_reviews(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = state.list_reviews_handler().mine(&user.id).await?;
    Ok(Json(reviews))
}

/// `GET /api/reviews/dashboard` - public feed and own reviews in one call.
pub async fn dashboard_reviews(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ReviewListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = ReviewFilter::from(query);
    let result = state
        .list_reviews_handler()
        .dashboard(&user.id, &filter)
        .await?;
    Ok(Json(DashboardResponse {
        public: result.public,
        mine: result.mine,
    }))
}

/// `POST /api/createReview`
pub async fn create_review(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(input): ApiJson<ReviewInput>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_review_handler()
        .handle(CreateReviewCommand {
            author: user.id,
            input,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ReviewWriteResponse {
            review: result.review,
            rating: Some(result.rating),
        }),
    ))
}

/// `PUT /api/updateReview`
pub async fn update_review(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<UpdateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let review_id: ReviewId = ApiError::parse_id("id", &request.id)?;
    let result = state
        .update_review_handler()
        .handle(UpdateReviewCommand {
            review_id,
            user_id: user.id,
            input: request.fields,
        })
        .await?;
    Ok(Json(ReviewWriteResponse {
        review: result.review,
        rating: result.rating,
    }))
}

/// `DELETE /api/deleteReview?id=`
pub async fn delete_review(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ReviewIdQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let review_id: ReviewId = ApiError::parse_id("id", &query.id)?;
    let result = state
        .delete_review_handler()
        .handle(DeleteReviewCommand {
            review_id,
            user_id: user.id,
        })
        .await?;
    Ok(Json(ReviewDeletedResponse {
        id: result.review_id.to_string(),
        rating: result.rating,
    }))
}

/// `GET /api/barbers` - aggregate leaderboard.
pub async fn list_ratings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let ratings = state.list_ratings_handler().handle().await?;
    Ok(Json(ratings))
}
