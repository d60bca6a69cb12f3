//! HTTP integration tests for reviews, ratings and roles.
//!
//! Drives the real router over in-memory stores and the mock session
//! validator with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use styleboard::adapters::auth::MockSessionValidator;
use styleboard::adapters::http::{api_routes, AppSettings, AppState};
use styleboard::adapters::storage::InMemoryImageStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

const JANE: &str = "jane-token";
const OMAR: &str = "omar-token";

fn state() -> AppState {
    let validator = MockSessionValidator::new()
        .with_email(JANE, "jane@example.com")
        .with_email(OMAR, "omar@example.com");
    AppState::in_memory(
        Arc::new(validator),
        Arc::new(InMemoryImageStore::new()),
        AppSettings::default(),
    )
}

fn app(state: &AppState) -> Router {
    api_routes(state).with_state(state.clone())
}

async fn call(
    state: &AppState,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn review(rating: i64) -> Value {
    json!({
        "professional_name": "Marcus Lee",
        "venue": "Fade Factory",
        "location": "Austin, TX",
        "service_type": "Skin fade",
        "rating": rating,
        "cost": 35.0,
        "title": "Sharp work",
        "body": "Clean lines and on time.",
        "is_public": true
    })
}

fn aggregate(body: &Value) -> (f64, u64) {
    (
        body["rating"]["average_rating"].as_f64().unwrap(),
        body["rating"]["total_reviews"].as_u64().unwrap(),
    )
}

// =============================================================================
// Reviews and aggregates
// =============================================================================

#[tokio::test]
async fn aggregate_follows_create_and_delete() {
    let state = state();

    let (status, first) = call(&state, "POST", "/api/createReview", Some(JANE), Some(review(5))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(aggregate(&first), (5.0, 1));

    let (status, second) = call(&state, "POST", "/api/createReview", Some(OMAR), Some(review(3))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(aggregate(&second), (4.0, 2));

    let id = first["review"]["id"].as_str().unwrap();
    let (status, deleted) = call(
        &state,
        "DELETE",
        &format!("/api/deleteReview?id={}", id),
        Some(JANE),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(aggregate(&deleted), (3.0, 1));
}

#[tokio::test]
async fn deleting_last_review_removes_the_aggregate() {
    let state = state();
    let (_, created) = call(&state, "POST", "/api/createReview", Some(JANE), Some(review(4))).await;
    let id = created["review"]["id"].as_str().unwrap();

    let (status, deleted) = call(
        &state,
        "DELETE",
        &format!("/api/deleteReview?id={}", id),
        Some(JANE),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(deleted["rating"].is_null());

    let (status, barbers) = call(&state, "GET", "/api/barbers", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(barbers, json!([]));
}

#[tokio::test]
async fn out_of_range_rating_is_rejected() {
    let state = state();
    for rating in [0, 6] {
        let (status, body) =
            call(&state, "POST", "/api/createReview", Some(JANE), Some(review(rating))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {}", rating);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }
}

#[tokio::test]
async fn malformed_review_bodies_are_validation_errors() {
    let state = state();

    let mut missing_title = review(5);
    missing_title.as_object_mut().unwrap().remove("title");
    let mut fractional = review(5);
    fractional["rating"] = json!(7.5);
    let mut huge = review(5);
    huge["rating"] = json!(1e20);

    for body in [missing_title, fractional, huge] {
        let (status, error) =
            call(&state, "POST", "/api/createReview", Some(JANE), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "VALIDATION_FAILED");
        assert!(!error["message"].as_str().unwrap().is_empty());
    }

    let (status, error) =
        call(&state, "POST", "/api/userRoleSimple", Some(JANE), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_FAILED");

    let (_, barbers) = call(&state, "GET", "/api/barbers", None, None).await;
    assert_eq!(barbers, json!([]));
}

#[tokio::test]
async fn writes_require_authentication() {
    let state = state();
    let (status, body) = call(&state, "POST", "/api/createReview", None, Some(review(5))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = call(&state, "POST", "/api/createReview", Some("forged"), Some(review(5))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn only_the_author_can_change_a_review() {
    let state = state();
    let (_, created) = call(&state, "POST", "/api/createReview", Some(JANE), Some(review(5))).await;
    let id = created["review"]["id"].as_str().unwrap().to_string();

    let mut update = review(2);
    update["id"] = json!(id);
    let (status, _) = call(&state, "PUT", "/api/updateReview", Some(OMAR), Some(update.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &state,
        "DELETE",
        &format!("/api/deleteReview?id={}", id),
        Some(OMAR),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = call(&state, "PUT", "/api/updateReview", Some(JANE), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(aggregate(&updated), (2.0, 1));
}

#[tokio::test]
async fn private_reviews_stay_out_of_the_public_feed() {
    let state = state();
    let mut private = review(4);
    private["is_public"] = json!(false);
    call(&state, "POST", "/api/createReview", Some(JANE), Some(private)).await;
    call(&state, "POST", "/api/createReview", Some(OMAR), Some(review(5))).await;

    let (_, public) = call(&state, "GET", "/api/reviews", None, None).await;
    assert_eq!(public.as_array().unwrap().len(), 1);

    let (status, dashboard) = call(&state, "GET", "/api/reviews/dashboard", Some(JANE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["public"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["mine"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_review_id_is_a_bad_request() {
    let state = state();
    let (status, _) = call(&state, "DELETE", "/api/deleteReview?id=nope", Some(JANE), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Roles
// =============================================================================

#[tokio::test]
async fn unknown_user_resolves_to_customer() {
    let state = state();
    let (status, body) = call(&state, "GET", "/api/userRoleSimple", Some(JANE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "customer");
    assert_eq!(body["hasRecord"], false);
    assert_eq!(body["home"]["route"], "/dashboard");
}

#[tokio::test]
async fn creating_a_profile_makes_the_caller_a_professional() {
    let state = state();
    let (status, _) = call(
        &state,
        "POST",
        "/api/professionalProfileSimple",
        Some(JANE),
        Some(json!({ "business_name": "Fade Factory", "city": "Austin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, role) = call(&state, "GET", "/api/userRoleSimple", Some(JANE), None).await;
    assert_eq!(role["role"], "professional");
    assert_eq!(role["hasRecord"], true);
    assert_eq!(role["home"]["defaultTab"], "profile");

    let (status, _) = call(
        &state,
        "POST",
        "/api/professionalProfileSimple",
        Some(JANE),
        Some(json!({ "business_name": "Again" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn health_and_client_config_are_public() {
    let state = state();
    let response = app(&state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, config) = call(&state, "GET", "/api/clientConfig", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["ai_search_enabled"], false);
    assert_eq!(config["chatkit_enabled"], false);
}
