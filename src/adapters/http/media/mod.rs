//! HTTP adapter for image uploads.

mod handlers;
mod routes;

pub use handlers::FILE_FIELD;
pub use routes::media_routes;
