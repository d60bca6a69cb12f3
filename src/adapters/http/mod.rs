//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter (`dto`, `handlers`, `routes`);
//! `router` merges them behind the auth middleware.

pub mod account;
pub mod client;
pub mod error;
pub mod media;
pub mod middleware;
pub mod professional;
pub mod reminder;
pub mod review;
pub mod role;
pub mod router;
pub mod search;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_routes, build_router, RouterOptions};
pub use state::{AppSettings, AppState};
