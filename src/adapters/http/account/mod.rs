//! HTTP adapter for account deletion and usernames.

mod dto;
mod handlers;
mod routes;

pub use routes::account_routes;
