//! Top-level router: every module's routes, the auth layer and the
//! tower-http stack.

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use http::{header, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::account::account_routes;
use super::client::client_routes;
use super::media::media_routes;
use super::middleware::auth_middleware;
use super::professional::professional_routes;
use super::reminder::reminder_routes;
use super::review::review_routes;
use super::role::role_routes;
use super::search::search_routes;
use super::state::AppState;

/// Transport settings that sit outside `AppState`.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Allowed browser origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Routes and the auth layer, still waiting for state. Tests use this
/// directly to skip the transport stack.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    // Multipart framing adds overhead on top of the file itself, and an
    // oversized image must reach the upload handler to get a 400.
    let body_limit = state.settings.max_upload_bytes.saturating_mul(2);

    Router::new()
        .merge(review_routes())
        .merge(role_routes())
        .merge(professional_routes())
        .merge(media_routes())
        .merge(search_routes())
        .merge(account_routes())
        .merge(reminder_routes())
        .merge(client_routes())
        .layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// The full application router.
pub fn build_router(state: AppState, options: &RouterOptions) -> Router {
    api_routes(&state).with_state(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(cors_layer(&options.cors_origins))
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(options.request_timeout)),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::HeaderName::from_static("x-dispatch-secret"),
    ];

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new().allow_methods(methods);
    if parsed.is_empty() {
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(parsed))
            .allow_headers(headers)
    }
}
