//! HTTP routes for professional endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{
    create_portfolio_item, create_profile, create_service, delete_portfolio_item,
    delete_service, get_own_profile, get_public_profile, list_portfolio, list_professionals,
    list_services, update_portfolio_item, update_profile, update_service,
};

/// Professional routes.
///
/// ## Owner endpoints (require authentication)
/// - `GET|POST|PUT /api/professionalProfileSimple`
/// - `GET|POST|PUT|DELETE /api/services`
/// - `GET|POST|PUT|DELETE /api/portfolio`
///
/// ## Public endpoints
/// - `GET /api/professionals` - directory
/// - `GET /api/professionals/:id` - profile page
pub fn professional_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/professionalProfileSimple",
            get(get_own_profile).post(create_profile).put(update_profile),
        )
        .route("/api/professionals", get(list_professionals))
        .route("/api/professionals/:id", get(get_public_profile))
        .route(
            "/api/services",
            get(list_services)
                .post(create_service)
                .put(update_service)
                .delete(delete_service),
        )
        .route(
            "/api/portfolio",
            get(list_portfolio)
                .post(create_portfolio_item)
                .put(update_portfolio_item)
                .delete(delete_portfolio_item),
        )
}
