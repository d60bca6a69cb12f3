//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ReviewRepository` / `RatingReader` - Reviews and aggregate ratings
//! - `RoleRepository` / `RoleCache` - Account roles
//! - `ProfileRepository`, `ServiceRepository`, `PortfolioRepository`
//! - `UsageStore` - AI session quota counters
//! - `UsernameRepository`, `ReminderRepository`
//!
//! ## External Service Ports
//!
//! - `SessionValidator` - Access token validation
//! - `ImageStore` - Object storage for images
//! - `SearchAgent` / `ChatKitProvider` - Hosted LLM agent
//! - `EmailSender` - Transactional email

mod account_store;
mod email_sender;
mod image_store;
mod professional_repository;
mod review_repository;
mod role_store;
mod search_agent;
mod session_validator;
mod usage_store;

pub use account_store::{ReminderRepository, UsernameRepository};
pub use email_sender::{EmailError, EmailSender, OutgoingEmail};
pub use image_store::{ImageStore, StorageError};
pub use professional_repository::{PortfolioRepository, ProfileRepository, ServiceRepository};
pub use review_repository::{sort_ratings, RatingReader, ReviewFilter, ReviewRepository};
pub use role_store::{RoleCache, RoleRepository};
pub use search_agent::{
    AgentError, ChatKitProvider, ChatKitSession, RunHandle, RunStatus, SearchAgent,
};
pub use session_validator::SessionValidator;
pub use usage_store::UsageStore;
