//! In-memory adapters.
//!
//! Process-local implementations of every persistence port. Used by the
//! test suite and by local development runs without a database.

mod accounts;
mod professionals;
mod reviews;
mod roles;
mod usage;

pub use accounts::{InMemoryReminderRepository, InMemoryUsernameRepository};
pub use professionals::InMemoryProfessionalStore;
pub use reviews::InMemoryReviewStore;
pub use roles::{InMemoryRoleCache, InMemoryRoleRepository};
pub use usage::InMemoryUsageStore;
