//! HTTP adapter for reviews and aggregate ratings.

mod dto;
mod handlers;
mod routes;

pub use dto::{DashboardResponse, ReviewDeletedResponse, ReviewWriteResponse};
pub use routes::review_routes;
