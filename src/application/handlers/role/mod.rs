//! Role command and query handlers.

mod resolve_role;
mod set_role;

pub use resolve_role::{ResolveRoleHandler, ResolveRoleQuery};
pub use set_role::{SetRoleCommand, SetRoleHandler};
