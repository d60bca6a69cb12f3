//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresReviewRepository` - Reviews plus the `barbers` aggregate table
//! - `PostgresRoleRepository` - `user_roles`
//! - `PostgresProfessionalRepository` - Profiles, services, portfolio
//! - `PostgresUsageStore` - AI session quota counters
//! - `PostgresAccountRepository` - Usernames and reminders

mod accounts;
mod professionals;
mod reviews;
mod roles;
mod usage;

pub use accounts::PostgresAccountRepository;
pub use professionals::PostgresProfessionalRepository;
pub use reviews::PostgresReviewRepository;
pub use roles::PostgresRoleRepository;
pub use usage::PostgresUsageStore;
