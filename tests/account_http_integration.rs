//! HTTP integration tests for uploads, the directory, account deletion,
//! usernames and reminders.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use styleboard::adapters::auth::MockSessionValidator;
use styleboard::adapters::email::MockEmailSender;
use styleboard::adapters::http::{api_routes, AppSettings, AppState};
use styleboard::adapters::storage::InMemoryImageStore;
use styleboard::domain::foundation::{Timestamp, UserId};
use styleboard::domain::reminder::{Reminder, ReminderInput};
use styleboard::ports::ReminderRepository;

const JANE: &str = "jane-token";
const OMAR: &str = "omar-token";
const BOUNDARY: &str = "styleboard-test-boundary";

struct Harness {
    state: AppState,
    images: Arc<InMemoryImageStore>,
}

fn harness() -> Harness {
    let images = Arc::new(InMemoryImageStore::new());
    let validator = MockSessionValidator::new()
        .with_email(JANE, "jane@example.com")
        .with_email(OMAR, "omar@example.com");
    let state = AppState::in_memory(Arc::new(validator), images.clone(), AppSettings::default());
    Harness { state, images }
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = api_routes(state)
        .with_state(state.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn call(
    state: &AppState,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token));
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(state, request).await
}

fn multipart(content_type: &str, bytes: &[u8]) -> Body {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cut.png\"\r\nContent-Type: {ct}\r\n\r\n",
            b = BOUNDARY,
            ct = content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    Body::from(body)
}

async fn upload(state: &AppState, content_type: &str, bytes: &[u8]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/uploadImage")
        .header("Authorization", format!("Bearer {}", JANE))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(multipart(content_type, bytes))
        .unwrap();
    send(state, request).await
}

// =============================================================================
// Uploads
// =============================================================================

#[tokio::test]
async fn png_upload_is_stored_under_the_owner_folder() {
    let h = harness();
    let (status, body) = upload(&h.state, "image/png", &[0x89, b'P', b'N', b'G', 1, 2, 3]).await;
    assert_eq!(status, StatusCode::OK);
    let path = body["path"].as_str().unwrap();
    assert!(path.starts_with("jane_example.com/") || path.starts_with("jane@example.com/"));
    assert!(path.ends_with(".png"));
    assert!(body["url"].as_str().unwrap().contains(path));
    assert_eq!(h.images.object_count(), 1);
}

#[tokio::test]
async fn oversized_upload_never_reaches_storage() {
    let h = harness();
    let six_mb = vec![0u8; 6 * 1024 * 1024];
    let (status, _) = upload(&h.state, "image/jpeg", &six_mb).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.images.object_count(), 0);
}

#[tokio::test]
async fn non_image_upload_never_reaches_storage() {
    let h = harness();
    let (status, _) = upload(&h.state, "application/pdf", b"%PDF-1.7").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.images.object_count(), 0);
}

// =============================================================================
// Directory
// =============================================================================

#[tokio::test]
async fn directory_lists_profiles_with_services_and_portfolio() {
    let h = harness();
    let (status, profile) = call(
        &h.state,
        "POST",
        "/api/professionalProfileSimple",
        JANE,
        Some(json!({
            "business_name": "Fade Factory",
            "city": "Austin",
            "specialties": ["Fades", "Beards"],
            "price_range": "$$"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let profile_id = profile["id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &h.state,
        "POST",
        "/api/services",
        JANE,
        Some(json!({ "name": "Skin fade", "price_min": 30, "price_max": 45, "duration_minutes": 45 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &h.state,
        "POST",
        "/api/services",
        JANE,
        Some(json!({ "name": "Backwards", "price_min": 50, "price_max": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &h.state,
        "POST",
        "/api/portfolio",
        JANE,
        Some(json!({ "image_url": "https://cdn.example.com/cut.png", "caption": "Mid fade" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, listed) = call(&h.state, "GET", "/api/professionals?city=austin", OMAR, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, none) = call(&h.state, "GET", "/api/professionals?specialty=braids", OMAR, None).await;
    assert_eq!(none, json!([]));

    let (status, page) = call(
        &h.state,
        "GET",
        &format!("/api/professionals/{}", profile_id),
        OMAR,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["services"].as_array().unwrap().len(), 1);
    assert_eq!(page["portfolio"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn services_of_other_professionals_are_not_found() {
    let h = harness();
    for (token, name) in [(JANE, "Fade Factory"), (OMAR, "Braid Bar")] {
        call(
            &h.state,
            "POST",
            "/api/professionalProfileSimple",
            token,
            Some(json!({ "business_name": name })),
        )
        .await;
    }
    let (_, service) = call(
        &h.state,
        "POST",
        "/api/services",
        JANE,
        Some(json!({ "name": "Skin fade" })),
    )
    .await;
    let id = service["id"].as_str().unwrap();

    let (status, _) = call(
        &h.state,
        "DELETE",
        &format!("/api/services?id={}", id),
        OMAR,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &h.state,
        "DELETE",
        &format!("/api/services?id={}", id),
        JANE,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn portfolio_cannot_claim_or_delete_another_users_upload() {
    let h = harness();
    let (_, jane_image) = upload(&h.state, "image/png", &[1, 2, 3]).await;
    let url = jane_image["url"].as_str().unwrap().to_string();

    call(
        &h.state,
        "POST",
        "/api/professionalProfileSimple",
        OMAR,
        Some(json!({ "business_name": "Braid Bar" })),
    )
    .await;
    let (status, error) = call(
        &h.state,
        "POST",
        "/api/portfolio",
        OMAR,
        Some(json!({ "image_url": url })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_FAILED");
    assert_eq!(h.images.object_count(), 1);

    let (status, _) = call(
        &h.state,
        "DELETE",
        "/api/deleteAccount",
        OMAR,
        Some(json!({ "confirmation": "DELETE MY ACCOUNT" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.images.object_count(), 1);
}

// =============================================================================
// Account
// =============================================================================

#[tokio::test]
async fn username_claims_are_unique() {
    let h = harness();
    let (status, claimed) = call(&h.state, "POST", "/api/username", JANE, Some(json!({ "username": "jane_cuts" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(claimed["username"], "jane_cuts");

    let (status, _) = call(&h.state, "POST", "/api/username", OMAR, Some(json!({ "username": "jane_cuts" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&h.state, "POST", "/api/username", OMAR, Some(json!({ "username": "No Spaces!" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, mine) = call(&h.state, "GET", "/api/username", OMAR, None).await;
    assert!(mine["username"].is_null());
}

#[tokio::test]
async fn account_deletion_needs_the_exact_phrase() {
    let h = harness();
    let (status, _) = call(
        &h.state,
        "DELETE",
        "/api/deleteAccount",
        JANE,
        Some(json!({ "confirmation": "delete my account" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn account_deletion_removes_app_data_and_recomputes_ratings() {
    let h = harness();
    let review = |rating: i64| {
        json!({
            "professional_name": "Marcus Lee",
            "venue": "Fade Factory",
            "service_type": "Fade",
            "rating": rating,
            "title": "Visit",
            "body": "Notes",
            "is_public": true
        })
    };
    call(&h.state, "POST", "/api/createReview", JANE, Some(review(5))).await;
    call(&h.state, "POST", "/api/createReview", OMAR, Some(review(3))).await;
    call(&h.state, "POST", "/api/username", JANE, Some(json!({ "username": "jane" }))).await;
    call(
        &h.state,
        "POST",
        "/api/professionalProfileSimple",
        JANE,
        Some(json!({ "business_name": "Jane's Chair" })),
    )
    .await;

    let (status, report) = call(
        &h.state,
        "DELETE",
        "/api/deleteAccount",
        JANE,
        Some(json!({ "confirmation": "DELETE MY ACCOUNT" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["reviews_deleted"], 1);
    assert_eq!(report["profile_deleted"], true);
    assert_eq!(report["username_deleted"], true);
    assert_eq!(report["auth_account_deleted"], false);

    let (_, barbers) = call(&h.state, "GET", "/api/barbers", OMAR, None).await;
    assert_eq!(barbers[0]["average_rating"], 3.0);
    assert_eq!(barbers[0]["total_reviews"], 1);

    let (status, _) = call(&h.state, "GET", "/api/professionalProfileSimple", JANE, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, role) = call(&h.state, "GET", "/api/userRoleSimple", JANE, None).await;
    assert_eq!(role["hasRecord"], false);
}

// =============================================================================
// Reminders
// =============================================================================

#[tokio::test]
async fn reminders_are_scheduled_in_the_future_and_owner_scoped() {
    let h = harness();
    let later = (Utc::now() + ChronoDuration::days(7)).to_rfc3339();
    let (status, reminder) = call(
        &h.state,
        "POST",
        "/api/reminders",
        JANE,
        Some(json!({ "professional_name": "Marcus Lee", "note": "Book a trim", "remind_at": later })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = reminder["id"].as_str().unwrap();

    let earlier = (Utc::now() - ChronoDuration::days(1)).to_rfc3339();
    let (status, _) = call(
        &h.state,
        "POST",
        "/api/reminders",
        JANE,
        Some(json!({ "professional_name": "Marcus Lee", "remind_at": earlier })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&h.state, "DELETE", &format!("/api/reminders?id={}", id), OMAR, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = call(&h.state, "GET", "/api/reminders", JANE, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dispatch_sends_due_reminders_with_the_shared_secret() {
    let mut h = harness();
    let email = Arc::new(MockEmailSender::new());
    h.state.email = Some(email.clone());
    h.state.settings.dispatch_secret = Some("s3cret".to_string());

    let an_hour_ago = Timestamp::now().plus_secs(-3600);
    let due = Reminder::schedule(
        UserId::new("jane@example.com").unwrap(),
        ReminderInput {
            professional_name: "Marcus Lee".to_string(),
            note: None,
            remind_at: *an_hour_ago.plus_secs(60).as_datetime(),
        },
        an_hour_ago,
    )
    .unwrap();
    h.state.reminders.insert_reminder(&due).await.unwrap();

    let dispatch = |secret: &str| {
        Request::builder()
            .method("POST")
            .uri("/api/reminders/dispatch")
            .header("x-dispatch-secret", secret)
            .body(Body::empty())
            .unwrap()
    };

    for wrong in ["wrong", "s3cre", "s3cret2"] {
        let (status, _) = send(&h.state, dispatch(wrong)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "secret {}", wrong);
    }
    assert!(email.sent().is_empty());

    let (status, report) = send(&h.state, dispatch("s3cret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["sent"], 1);
    assert_eq!(email.sent()[0].to, "jane@example.com");

    let (_, again) = send(&h.state, dispatch("s3cret")).await;
    assert_eq!(again["due"], 0);
}
