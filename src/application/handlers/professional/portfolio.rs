//! CRUD for portfolio items on the caller's profile.
//!
//! An item may only reference stored images from the caller's own folder.
//! Deleting an item also removes that image; a failed removal is logged and
//! the item stays deleted.

use std::sync::Arc;

use super::own_profile;
use crate::domain::foundation::{
    DomainError, PortfolioItemId, ProfileId, Timestamp, UserId, ValidationError,
};
use crate::domain::media::is_owned_path;
use crate::domain::professional::{PortfolioDraft, PortfolioInput, PortfolioItem};
use crate::ports::{ImageStore, PortfolioRepository, ProfileRepository};

#[derive(Debug, Clone)]
pub struct SavePortfolioItemCommand {
    pub owner: UserId,
    /// `None` creates a new item.
    pub item_id: Option<PortfolioItemId>,
    pub input: PortfolioInput,
}

pub struct ManagePortfolioHandler {
    profiles: Arc<dyn ProfileRepository>,
    portfolio: Arc<dyn PortfolioRepository>,
    images: Arc<dyn ImageStore>,
}

impl ManagePortfolioHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        portfolio: Arc<dyn PortfolioRepository>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            profiles,
            portfolio,
            images,
        }
    }

    pub async fn list(&self, owner: &UserId) -> Result<Vec<PortfolioItem>, DomainError> {
        let profile = own_profile(self.profiles.as_ref(), owner).await?;
        self.portfolio.list_items(profile.id).await
    }

    pub async fn save(&self, cmd: SavePortfolioItemCommand) -> Result<PortfolioItem, DomainError> {
        let draft = PortfolioDraft::new(cmd.input)?;
        if let Some(path) = self.images.path_for_url(&draft.image_url) {
            if !is_owned_path(&cmd.owner, &path) {
                return Err(ValidationError::invalid_format(
                    "image_url",
                    "stored images must be uploaded by the profile owner",
                )
                .into());
            }
        }
        let profile = own_profile(self.profiles.as_ref(), &cmd.owner).await?;
        let now = Timestamp::now();

        match cmd.item_id {
            None => {
                let item = PortfolioItem::create(profile.id, draft, now);
                self.portfolio.insert_item(&item).await?;
                tracing::info!(item_id = %item.id, user = %cmd.owner, "portfolio item created");
                Ok(item)
            }
            Some(id) => {
                let mut item = self.owned(profile.id, id).await?;
                item.apply(draft, now);
                self.portfolio.update_item(&item).await?;
                tracing::info!(item_id = %id, user = %cmd.owner, "portfolio item updated");
                Ok(item)
            }
        }
    }

    pub async fn delete(&self, owner: &UserId, id: PortfolioItemId) -> Result<(), DomainError> {
        let profile = own_profile(self.profiles.as_ref(), owner).await?;
        let item = self.owned(profile.id, id).await?;
        self.portfolio.delete_item(id).await?;
        tracing::info!(item_id = %id, user = %owner, "portfolio item deleted");

        remove_stored_image(self.images.as_ref(), owner, &item.image_url).await;
        Ok(())
    }

    async fn owned(&self, profile: ProfileId, id: PortfolioItemId) -> Result<PortfolioItem, DomainError> {
        self.portfolio
            .find_item(id)
            .await?
            .filter(|item| item.profile_id == profile)
            .ok_or_else(|| DomainError::not_found("Portfolio item"))
    }
}

/// Removes the object behind `url` if it lives in `images` under `owner`'s folder.
pub(crate) async fn remove_stored_image(images: &dyn ImageStore, owner: &UserId, url: &str) {
    let Some(path) = images.path_for_url(url) else {
        return;
    };
    if !is_owned_path(owner, &path) {
        tracing::warn!(path = %path, user = %owner, "skipping removal of another user's image");
        return;
    }
    if let Err(e) = images.remove(&path).await {
        tracing::warn!(path = %path, error = %e, "failed to remove stored image");
    }
}
