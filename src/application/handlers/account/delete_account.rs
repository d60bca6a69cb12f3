//! DeleteAccountHandler - removes everything the app stores for a user.
//!
//! Reviews are deleted one at a time through the review repository so
//! every affected rating aggregate is recomputed. The identity-provider
//! account is left in place.

use std::sync::Arc;

use crate::application::handlers::professional::remove_stored_image;
use crate::domain::account::{confirm_deletion, AccountDeletionReport};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::search::UsageKey;
use crate::ports::{
    ImageStore, ProfileRepository, ReminderRepository, ReviewRepository, RoleCache,
    RoleRepository, UsageStore, UsernameRepository,
};

#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub user_id: UserId,
    pub confirmation: String,
}

/// Stores touched by an account deletion.
#[derive(Clone)]
pub struct AccountStores {
    pub reviews: Arc<dyn ReviewRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub images: Arc<dyn ImageStore>,
    pub roles: Arc<dyn RoleRepository>,
    pub role_cache: Arc<dyn RoleCache>,
    pub usernames: Arc<dyn UsernameRepository>,
    pub reminders: Arc<dyn ReminderRepository>,
    pub usage: Arc<dyn UsageStore>,
}

pub struct DeleteAccountHandler {
    stores: AccountStores,
}

impl DeleteAccountHandler {
    pub fn new(stores: AccountStores) -> Self {
        Self { stores }
    }

    pub async fn handle(&self, cmd: DeleteAccountCommand) -> Result<AccountDeletionReport, DomainError> {
        confirm_deletion(&cmd.confirmation)?;
        let user = &cmd.user_id;
        let s = &self.stores;
        let mut report = AccountDeletionReport::default();

        for review in s.reviews.list_by_author(user).await? {
            s.reviews.delete(&review).await?;
            report.reviews_deleted += 1;
        }

        if let Some((profile, items)) = s.profiles.delete_by_owner(user).await? {
            tracing::debug!(profile_id = %profile.id, items = items.len(), "deleted professional profile");
            for item in &items {
                remove_stored_image(s.images.as_ref(), user, &item.image_url).await;
            }
            report.profile_deleted = true;
        }

        report.role_deleted = s.roles.delete_role(user).await?;
        if let Err(e) = s.role_cache.invalidate(user).await {
            tracing::warn!(user = %user, error = %e, "failed to invalidate cached role");
        }

        report.username_deleted = s.usernames.release(user).await?;
        report.reminders_deleted = s.reminders.delete_by_owner(user).await?;
        report.usage_deleted = s.usage.delete_usage(&UsageKey::for_user(user)).await?;
        report.auth_account_deleted = false;

        tracing::info!(
            user = %user,
            reviews = report.reviews_deleted,
            profile = report.profile_deleted,
            "account data deleted"
        );
        Ok(report)
    }
}
