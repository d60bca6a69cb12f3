//! HTTP adapter for AI search, ChatKit sessions and the usage quota.

mod dto;
mod handlers;
mod routes;

pub use routes::search_routes;
