//! HTTP adapter for client bootstrap config and the health check.

mod handlers;
mod routes;

pub use handlers::ClientConfigResponse;
pub use routes::client_routes;
