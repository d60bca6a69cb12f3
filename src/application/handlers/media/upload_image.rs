//! UploadImageHandler - validates and stores an uploaded image.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::media::{ImageUpload, StoredImage};
use crate::ports::ImageStore;

#[derive(Debug, Clone)]
pub struct UploadImageCommand {
    pub owner: UserId,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct UploadImageHandler {
    images: Arc<dyn ImageStore>,
    max_bytes: usize,
}

impl UploadImageHandler {
    pub fn new(images: Arc<dyn ImageStore>, max_bytes: usize) -> Self {
        Self { images, max_bytes }
    }

    pub async fn handle(&self, cmd: UploadImageCommand) -> Result<StoredImage, DomainError> {
        // Type and size are checked before the store is touched.
        let upload = ImageUpload::new(
            &cmd.owner,
            cmd.content_type.as_deref(),
            cmd.bytes,
            self.max_bytes,
        )?;

        let stored = self.images.put(&upload).await.map_err(|e| {
            tracing::error!(user = %cmd.owner, path = %upload.object_key, error = %e, "image upload failed");
            DomainError::from(e)
        })?;

        tracing::info!(user = %cmd.owner, path = %stored.path, bytes = upload.size(), "image uploaded");
        Ok(stored)
    }
}
