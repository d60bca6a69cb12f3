//! Redis adapters.

mod role_cache;

pub use role_cache::RedisRoleCache;
