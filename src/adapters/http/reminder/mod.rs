//! HTTP adapter for reminders and their email dispatch.

mod dto;
mod handlers;
mod routes;

pub use handlers::DISPATCH_SECRET_HEADER;
pub use routes::reminder_routes;
