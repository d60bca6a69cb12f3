//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `role` - Customer/professional role and landing routes
//! - `review` - Client reviews and aggregate professional ratings
//! - `professional` - Professional profiles, services and portfolio
//! - `media` - Image upload checks and object keys
//! - `search` - AI search queries and session quotas
//! - `account` - Usernames and account deletion
//! - `reminder` - Rebooking reminders

pub mod account;
pub mod foundation;
pub mod media;
pub mod professional;
pub mod reminder;
pub mod review;
pub mod role;
pub mod search;
