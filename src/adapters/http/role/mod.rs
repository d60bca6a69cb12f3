//! HTTP adapter for the account role.

mod dto;
mod handlers;
mod routes;

pub use dto::RoleResponse;
pub use routes::role_routes;
