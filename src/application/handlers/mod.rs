//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod media;
pub mod professional;
pub mod reminder;
pub mod review;
pub mod role;
pub mod search;

pub use account::{
    AccountStores, ClaimUsernameCommand, ClaimUsernameHandler, DeleteAccountCommand,
    DeleteAccountHandler, GetUsernameHandler,
};
pub use media::{UploadImageCommand, UploadImageHandler};
pub use professional::{
    CreateProfileCommand, CreateProfileHandler, GetOwnProfileHandler, GetPublicProfileHandler,
    ListProfessionalsHandler, ManagePortfolioHandler, ManageServicesHandler,
    SavePortfolioItemCommand, SaveServiceCommand, UpdateProfileCommand, UpdateProfileHandler,
};
pub use reminder::{CreateReminderCommand, DispatchDueRemindersHandler, ManageRemindersHandler};
pub use review::{
    CreateReviewCommand, CreateReviewHandler, CreateReviewResult, DashboardReviews,
    DeleteReviewCommand, DeleteReviewHandler, DeleteReviewResult, ListRatingsHandler,
    ListReviewsHandler, UpdateReviewCommand, UpdateReviewHandler, UpdateReviewResult,
};
pub use role::{ResolveRoleHandler, ResolveRoleQuery, SetRoleCommand, SetRoleHandler};
pub use search::{
    AiSearchCommand, AiSearchHandler, AiSearchResult, CreateChatKitSessionHandler, QuotaGate,
    SearchTiming, UsageHandler, UsagePolicy,
};
