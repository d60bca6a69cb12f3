//! HTTP middleware and extractors for axum.
//!
//! - `auth` - Authentication middleware and extractors
//! - `client_ip` - Client address for anonymous quota keys
//! - `json` - JSON body extractor with API error rejections

pub mod auth;
pub mod client_ip;
pub mod json;

pub use auth::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth};
pub use client_ip::ClientIp;
pub use json::ApiJson;
