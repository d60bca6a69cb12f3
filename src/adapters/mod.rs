//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI Assistants search agent and ChatKit sessions
//! - `auth` - Supabase JWT validation
//! - `email` - Resend
//! - `http` - axum REST API
//! - `memory` - In-process stores for tests and local runs
//! - `postgres` - PostgreSQL repositories
//! - `redis` - Role cache
//! - `storage` - Image storage (Supabase Storage, local disk)

pub mod ai;
pub mod auth;
pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod redis;
pub mod storage;
