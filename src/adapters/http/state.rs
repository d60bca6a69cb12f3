//! Shared application state.
//!
//! Cloned into every request. Handlers are built on demand from the
//! Arc-wrapped ports.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::{
    AccountStores, AiSearchHandler, ClaimUsernameHandler, CreateChatKitSessionHandler,
    CreateProfileHandler, CreateReviewHandler, DeleteAccountHandler, DeleteReviewHandler,
    DispatchDueRemindersHandler, GetOwnProfileHandler, GetPublicProfileHandler,
    GetUsernameHandler, ListProfessionalsHandler, ListRatingsHandler, ListReviewsHandler,
    ManagePortfolioHandler, ManageRemindersHandler, ManageServicesHandler, QuotaGate,
    ResolveRoleHandler, SearchTiming, SetRoleHandler, UpdateProfileHandler, UpdateReviewHandler,
    UploadImageHandler, UsageHandler, UsagePolicy,
};
use crate::adapters::memory::{
    InMemoryProfessionalStore, InMemoryReminderRepository, InMemoryReviewStore,
    InMemoryRoleCache, InMemoryRoleRepository, InMemoryUsageStore, InMemoryUsernameRepository,
};
use crate::domain::media::DEFAULT_MAX_UPLOAD_BYTES;
use crate::ports::{
    ChatKitProvider, EmailSender, ImageStore, PortfolioRepository, ProfileRepository,
    RatingReader, ReminderRepository, ReviewRepository, RoleCache, RoleRepository, SearchAgent,
    ServiceRepository, SessionValidator, UsageStore, UsernameRepository,
};

/// Tunables that are not ports.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub usage: UsagePolicy,
    pub search: SearchTiming,
    pub max_upload_bytes: usize,
    /// Shared secret for the reminder dispatch route; dispatch is off without it.
    pub dispatch_secret: Option<String>,
    /// Browser maps key exposed through `/api/clientConfig`.
    pub maps_api_key: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            usage: UsagePolicy::default(),
            search: SearchTiming::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            dispatch_secret: None,
            maps_api_key: None,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session_validator: Arc<dyn SessionValidator>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub ratings: Arc<dyn RatingReader>,
    pub roles: Arc<dyn RoleRepository>,
    pub role_cache: Arc<dyn RoleCache>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub portfolio: Arc<dyn PortfolioRepository>,
    pub images: Arc<dyn ImageStore>,
    pub usage: Arc<dyn UsageStore>,
    pub usernames: Arc<dyn UsernameRepository>,
    pub reminders: Arc<dyn ReminderRepository>,
    pub search_agent: Option<Arc<dyn SearchAgent>>,
    pub chatkit: Option<Arc<dyn ChatKitProvider>>,
    pub email: Option<Arc<dyn EmailSender>>,
    pub settings: AppSettings,
}

impl AppState {
    /// Every store in process memory, no AI and no email. Local runs without
    /// a database and the HTTP tests start from this.
    pub fn in_memory(
        session_validator: Arc<dyn SessionValidator>,
        images: Arc<dyn ImageStore>,
        settings: AppSettings,
    ) -> Self {
        let reviews = Arc::new(InMemoryReviewStore::new());
        let professionals = Arc::new(InMemoryProfessionalStore::new());
        Self {
            session_validator,
            reviews: reviews.clone(),
            ratings: reviews,
            roles: Arc::new(InMemoryRoleRepository::new()),
            role_cache: Arc::new(InMemoryRoleCache::new(Duration::from_secs(3600))),
            profiles: professionals.clone(),
            services: professionals.clone(),
            portfolio: professionals,
            images,
            usage: Arc::new(InMemoryUsageStore::new()),
            usernames: Arc::new(InMemoryUsernameRepository::new()),
            reminders: Arc::new(InMemoryReminderRepository::new()),
            search_agent: None,
            chatkit: None,
            email: None,
            settings,
        }
    }

    // Reviews

    pub fn create_review_handler(&self) -> CreateReviewHandler {
        CreateReviewHandler::new(self.reviews.clone())
    }

    pub fn update_review_handler(&self) -> UpdateReviewHandler {
        UpdateReviewHandler::new(self.reviews.clone())
    }

    pub fn delete_review_handler(&self) -> DeleteReviewHandler {
        DeleteReviewHandler::new(self.reviews.clone())
    }

    pub fn list_reviews_handler(&self) -> ListReviewsHandler {
        ListReviewsHandler::new(self.reviews.clone())
    }

    pub fn list_ratings_handler(&self) -> ListRatingsHandler {
        ListRatingsHandler::new(self.ratings.clone())
    }

    // Roles

    pub fn resolve_role_handler(&self) -> ResolveRoleHandler {
        ResolveRoleHandler::new(self.roles.clone(), self.role_cache.clone())
    }

    pub fn set_role_handler(&self) -> SetRoleHandler {
        SetRoleHandler::new(self.roles.clone(), self.role_cache.clone())
    }

    // Professionals

    pub fn get_own_profile_handler(&self) -> GetOwnProfileHandler {
        GetOwnProfileHandler::new(self.profiles.clone(), self.ratings.clone())
    }

    pub fn create_profile_handler(&self) -> CreateProfileHandler {
        CreateProfileHandler::new(
            self.profiles.clone(),
            self.ratings.clone(),
            self.roles.clone(),
            self.role_cache.clone(),
        )
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.profiles.clone(), self.ratings.clone())
    }

    pub fn list_professionals_handler(&self) -> ListProfessionalsHandler {
        ListProfessionalsHandler::new(self.profiles.clone(), self.ratings.clone())
    }

    pub fn public_profile_handler(&self) -> GetPublicProfileHandler {
        GetPublicProfileHandler::new(
            self.profiles.clone(),
            self.services.clone(),
            self.portfolio.clone(),
            self.ratings.clone(),
        )
    }

    pub fn services_handler(&self) -> ManageServicesHandler {
        ManageServicesHandler::new(self.profiles.clone(), self.services.clone())
    }

    pub fn portfolio_handler(&self) -> ManagePortfolioHandler {
        ManagePortfolioHandler::new(
            self.profiles.clone(),
            self.portfolio.clone(),
            self.images.clone(),
        )
    }

    // Media

    pub fn upload_image_handler(&self) -> UploadImageHandler {
        UploadImageHandler::new(self.images.clone(), self.settings.max_upload_bytes)
    }

    // Search

    fn quota_gate(&self) -> QuotaGate {
        QuotaGate::new(self.usage.clone(), self.settings.usage)
    }

    /// `None` when no search agent is configured.
    pub fn ai_search_handler(&self) -> Option<AiSearchHandler> {
        self.search_agent.as_ref().map(|agent| {
            AiSearchHandler::new(agent.clone(), self.quota_gate(), self.settings.search)
        })
    }

    /// `None` when ChatKit is not configured.
    pub fn chatkit_session_handler(&self) -> Option<CreateChatKitSessionHandler> {
        self.chatkit
            .as_ref()
            .map(|provider| CreateChatKitSessionHandler::new(provider.clone(), self.quota_gate()))
    }

    pub fn usage_handler(&self) -> UsageHandler {
        UsageHandler::new(self.usage.clone(), self.settings.usage)
    }

    // Account

    pub fn delete_account_handler(&self) -> DeleteAccountHandler {
        DeleteAccountHandler::new(AccountStores {
            reviews: self.reviews.clone(),
            profiles: self.profiles.clone(),
            images: self.images.clone(),
            roles: self.roles.clone(),
            role_cache: self.role_cache.clone(),
            usernames: self.usernames.clone(),
            reminders: self.reminders.clone(),
            usage: self.usage.clone(),
        })
    }

    pub fn claim_username_handler(&self) -> ClaimUsernameHandler {
        ClaimUsernameHandler::new(self.usernames.clone())
    }

    pub fn get_username_handler(&self) -> GetUsernameHandler {
        GetUsernameHandler::new(self.usernames.clone())
    }

    // Reminders

    pub fn reminders_handler(&self) -> ManageRemindersHandler {
        ManageRemindersHandler::new(self.reminders.clone())
    }

    /// `None` when no email sender is configured.
    pub fn dispatch_reminders_handler(&self) -> Option<DispatchDueRemindersHandler> {
        self.email
            .as_ref()
            .map(|email| DispatchDueRemindersHandler::new(self.reminders.clone(), email.clone()))
    }
}
