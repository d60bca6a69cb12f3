//! HTTP adapter for professional profiles, the directory, services and portfolio.

mod dto;
mod handlers;
mod routes;

pub use routes::professional_routes;
